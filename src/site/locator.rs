use std::path::{Path, PathBuf};

use regex::Regex;
use rustc_hash::FxHashMap;

use crate::cli::config::SiteConfig;
use crate::sequence::alignment::{align_global, alignment_identity, residue_mapping};
use crate::sequence::chain_sequence;
use crate::sequence::matrix::SubstitutionMatrix;
use crate::site::ligand::{ligand_candidates, select_ligand};
use crate::structure::core::{Residue, ResidueId, Structure};
use crate::structure::grid::NeighborGrid;
use crate::structure::io::pdb::{write_pdb, Reader as PDBReader};
use crate::structure::kabsch::KabschSuperimposer;
use crate::utils::loader::{load_path, unzip_archive};
use crate::utils::log::{print_log_msg, INFO, WARN};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SkipReason {
    /// No ligand candidates in the member chain.
    NoLigand,
    /// A ligand name was requested and the member does not contain it.
    LigandNotFound,
    /// The alignment produced no aligned residue pairs.
    EmptyMapping,
}

/// Result of processing one cluster member. Skips are recoverable; a fatal
/// condition surfaces as an `Err` from `process_member` instead.
pub enum MemberOutcome {
    Accepted { ligand: Residue, rmsd: f32 },
    Skipped(SkipReason),
}

#[derive(Debug)]
pub struct BindingSiteReport {
    pub accepted_members: usize,
    pub skipped_members: usize,
    pub residues_kept: usize,
    pub residues_removed: usize,
}

/// Finds the binding site of the target structure from the ligand positions
/// of the cluster members and writes the target restricted to the
/// binding-site residues.
pub struct BindingSiteLocator {
    pub target_path: String,
    pub clusters_path: String,
    pub output_path: String,
    pub config: SiteConfig,
    pub verbose: bool,
}

impl BindingSiteLocator {
    pub fn new(
        target_path: &str, clusters_path: &str, output_path: &str, config: SiteConfig,
    ) -> Self {
        Self {
            target_path: target_path.to_string(),
            clusters_path: clusters_path.to_string(),
            output_path: output_path.to_string(),
            config,
            verbose: false,
        }
    }

    fn info(&self, msg: &str) {
        if self.verbose {
            print_log_msg(INFO, msg);
        }
    }

    pub fn run(&self) -> Result<BindingSiteReport, String> {
        if self.config.radius <= 0.0 {
            return Err(format!("Invalid radius {}", self.config.radius));
        }
        let matrix = SubstitutionMatrix::get_with_str(&self.config.matrix_name)?;
        self.info(&format!(
            "Scoring alignments with {} (gap open {}, gap extend {})",
            matrix.name, self.config.gap_open, self.config.gap_extend
        ));

        self.info(&format!("Loading target structure {}", self.target_path));
        let reader = PDBReader::from_file(&self.target_path)?;
        let mut target = reader.read_structure_auto(&self.target_path)?;
        if target.keep_first_chain() > 0 {
            self.info("More than one chain found in the target structure. Using only the first chain to find the binding site");
        }

        let target_seq = chain_sequence(target.first_chain().ok_or_else(|| {
            format!("No atoms found in target structure {}", self.target_path)
        })?);
        if target_seq.is_empty() {
            return Err(format!(
                "Cannot extract amino-acid sequence from the target structure {}. Wrong format?",
                self.target_path
            ));
        }
        self.info(&format!("Found {} residues in {}", target_seq.len(), self.target_path));

        // Cluster members come either as a zip archive or as a directory of
        // structure files.
        let clusters_is_dir = Path::new(&self.clusters_path).is_dir();
        let extract_dir = self.extract_dir();
        let members = if clusters_is_dir {
            load_path(&self.clusters_path, false)
        } else {
            unzip_archive(&self.clusters_path, &extract_dir)?
        };
        self.info(&format!("Found {} cluster members in {}", members.len(), self.clusters_path));

        let mut transferred: Vec<Residue> = Vec::new();
        let mut skipped = 0usize;
        for (idx, member_path) in members.iter().enumerate() {
            self.info(&format!("------------ Iteration #{} ------------", idx + 1));
            let outcome = self.process_member(member_path, &target, &target_seq, &matrix);
            // Clean up the extracted files before surfacing a fatal error.
            let outcome = match outcome {
                Ok(outcome) => outcome,
                Err(e) => {
                    if !clusters_is_dir {
                        std::fs::remove_dir_all(&extract_dir).ok();
                    }
                    return Err(e);
                }
            };
            match outcome {
                MemberOutcome::Accepted { ligand, rmsd } => {
                    self.info(&format!(
                        "Saving transformed ligand {} (RMSD {:.3})", ligand.name_str(), rmsd
                    ));
                    transferred.push(ligand);
                    // Soft cap: stop after max + 1 accepted members.
                    if self.config.max_members != 0 && transferred.len() > self.config.max_members {
                        break;
                    }
                }
                MemberOutcome::Skipped(_) => skipped += 1,
            }
        }
        if !clusters_is_dir {
            std::fs::remove_dir_all(&extract_dir).ok();
        }

        self.info(&format!(
            "Defining binding site residues as those {} length units around the {} superimposed ligands",
            self.config.radius,
            transferred.len()
        ));

        let site = accumulate_binding_site(&target, &transferred, self.config.radius);
        let report = self.filter_and_write(&mut target, &site, transferred.len(), skipped)?;
        self.info(&format!(
            "Wrote {} binding-site residues into {}", report.residues_kept, self.output_path
        ));
        Ok(report)
    }

    fn extract_dir(&self) -> PathBuf {
        let stem = Path::new(&self.clusters_path)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("clusters");
        std::env::temp_dir().join(format!("bindsite_{}_{}", std::process::id(), stem))
    }

    fn process_member(
        &self,
        member_path: &str,
        target: &Structure,
        target_seq: &[(ResidueId, u8)],
        matrix: &SubstitutionMatrix,
    ) -> Result<MemberOutcome, String> {
        let reader = PDBReader::from_file(member_path)?;
        let mut member = reader.read_structure_auto(member_path)?;
        member.keep_first_chain();
        self.info(&format!("Cluster member: {}", member.name));

        let Some(chain) = member.first_chain() else {
            print_log_msg(WARN, &format!(
                "No ligands found that could guide the binding site search. Ignoring this member: {}",
                member.name
            ));
            return Ok(MemberOutcome::Skipped(SkipReason::NoLigand));
        };

        let candidates = ligand_candidates(chain);
        if candidates.is_empty() {
            print_log_msg(WARN, &format!(
                "No ligands found that could guide the binding site search. Ignoring this member: {}",
                member.name
            ));
            return Ok(MemberOutcome::Skipped(SkipReason::NoLigand));
        }
        for candidate in &candidates {
            self.info(&format!(
                "Ligand found: {} ({} atoms)", candidate.name_str(), candidate.atoms.len()
            ));
        }

        let Some(ligand) = select_ligand(&candidates, self.config.ligand.as_deref()) else {
            print_log_msg(WARN, &format!(
                "Ligand {} not found in {} cluster member, skipping this cluster",
                self.config.ligand.as_deref().unwrap_or("?"),
                member.name
            ));
            return Ok(MemberOutcome::Skipped(SkipReason::LigandNotFound));
        };
        let ligand_id = ligand.id;
        self.info(&format!(
            "Member accepted. Valid ligand found: {} ({} atoms)",
            ligand.name_str(),
            ligand.atoms.len()
        ));

        let member_seq = chain_sequence(chain);
        let target_letters: Vec<u8> = target_seq.iter().map(|p| p.1).collect();
        let member_letters: Vec<u8> = member_seq.iter().map(|p| p.1).collect();
        let alignment = align_global(
            &target_letters,
            &member_letters,
            matrix,
            self.config.gap_open,
            self.config.gap_extend,
        );
        self.info(&format!(
            "Matching residues to the target structure. Alignment is:\n{}",
            String::from_utf8_lossy(&alignment.aligned_b)
        ));

        let mapping = residue_mapping(target_seq, &member_seq, &alignment);
        if mapping.is_empty() {
            print_log_msg(WARN, &format!(
                "No aligned residue pairs between {} and {}. Ignoring this member",
                member.name, target.name
            ));
            return Ok(MemberOutcome::Skipped(SkipReason::EmptyMapping));
        }

        let (seq_identity, gapless_identity) =
            alignment_identity(&alignment.aligned_a, &alignment.aligned_b);
        self.info(&format!("Sequence identity (%): {:.2}", seq_identity));
        self.info(&format!("Gap less identity (%): {:.2}", gapless_identity));

        // Alpha-carbons of the mapped residue pairs anchor the superposition.
        let target_chain = target.first_chain().unwrap();
        let member_chain = member.first_chain().unwrap();
        let mut fixed = Vec::with_capacity(mapping.len());
        let mut moving = Vec::with_capacity(mapping.len());
        for (target_id, member_id) in &mapping {
            let target_ca = target_chain.residue(target_id).and_then(|r| r.ca());
            let member_ca = member_chain.residue(member_id).and_then(|r| r.ca());
            match (target_ca, member_ca) {
                (Some(t), Some(m)) => {
                    fixed.push(t.coord);
                    moving.push(m.coord);
                }
                _ => {
                    print_log_msg(WARN, &format!(
                        "Cannot find CA atom for residue {} (target {})", target_id, target.name
                    ));
                }
            }
        }
        if fixed.is_empty() {
            return Err(format!(
                "Cannot find CA atoms (first chain) in cluster member {} when aligning against {}",
                member.name, target.name
            ));
        }
        self.info(&format!("Superimposing {} aligned protein residues", fixed.len()));

        let mut superimposer = KabschSuperimposer::new();
        superimposer
            .set_atoms(&fixed, &moving)
            .map_err(|e| format!("{} ({} onto {})", e, member.name, target.name))?;
        self.info(&format!("RMSD: {:.4}", superimposer.get_rms()));

        // The whole member is one rigid body; transforming every atom also
        // carries the ligand into the target frame.
        let (rot, tran) = superimposer.get_rotran();
        member.transform(&rot, &tran);
        let ligand = member
            .first_chain()
            .and_then(|c| c.residue(&ligand_id))
            .cloned()
            .ok_or_else(|| format!("Ligand {} lost after superposition in {}", ligand_id, member.name))?;

        Ok(MemberOutcome::Accepted { ligand, rmsd: superimposer.get_rms() })
    }

    fn filter_and_write(
        &self,
        target: &mut Structure,
        site: &FxHashMap<ResidueId, [u8; 3]>,
        accepted: usize,
        skipped: usize,
    ) -> Result<BindingSiteReport, String> {
        // Heteroatom and water residues never survive the filtering, even
        // when they fall inside the radius.
        let hetero = Regex::new("^(H_|W_|W)").unwrap();
        let mut kept = 0usize;
        let mut removed = 0usize;
        for chain in &mut target.chains {
            chain.residues.retain(|res| {
                let keep = site.contains_key(&res.id) && !hetero.is_match(&res.het_field());
                if keep {
                    kept += 1;
                } else {
                    removed += 1;
                }
                keep
            });
        }
        write_pdb(target, &self.output_path)?;
        Ok(BindingSiteReport {
            accepted_members: accepted,
            skipped_members: skipped,
            residues_kept: kept,
            residues_removed: removed,
        })
    }
}

/// Query the target around every atom of every transferred ligand and record
/// the identifiers of the residues within the radius.
pub fn accumulate_binding_site(
    target: &Structure,
    ligands: &[Residue],
    radius: f32,
) -> FxHashMap<ResidueId, [u8; 3]> {
    let grid = NeighborGrid::new(target, radius);
    let residue_ids: Vec<(ResidueId, [u8; 3])> = target
        .chains
        .iter()
        .flat_map(|c| c.residues.iter().map(|r| (r.id, r.name)))
        .collect();

    let mut site: FxHashMap<ResidueId, [u8; 3]> = FxHashMap::default();
    for ligand in ligands {
        for atom in &ligand.atoms {
            for residue_index in grid.query(&atom.coord, radius) {
                let (id, name) = residue_ids[residue_index];
                site.insert(id, name);
            }
        }
    }
    site
}
