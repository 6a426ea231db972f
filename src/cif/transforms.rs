use std::collections::BTreeSet;

use nalgebra::Vector3;

use crate::cif::record::CifRecord;
use crate::warnings::issue_warning;

/// Fractional distance below which two sites are the same site written
/// twice (partial occupancies).
const DUPLICATE_SITE_TOLERANCE: f64 = 4e-4;

/// Periodic distance in Å below which two distinct sites are a physical
/// collision.
const COLLISION_RADIUS: f64 = 0.55;

/// Periodic distance in Å below which a symmetry image is identified with
/// an existing site.
const IMAGE_MERGE_RADIUS: f64 = 0.5;

impl CifRecord {
    /// Collapses duplicate sites written with partial occupancies.
    ///
    /// Sites are sorted by fractional position; consecutive positions
    /// closer than 4·10⁻⁴ in the unit cube are one site, represented by
    /// the occurrence with the smallest index.
    pub fn remove_partial_occupancy(&self) -> CifRecord {
        let n = self.natoms();
        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| lex_cmp(&self.pos[a], &self.pos[b]));

        let mut kept: Vec<usize> = Vec::with_capacity(n);
        let mut run_start = 0;
        for i in 0..order.len() {
            let next_breaks = i + 1 == order.len()
                || (self.pos[order[i + 1]] - self.pos[order[i]]).norm() >= DUPLICATE_SITE_TOLERANCE;
            if next_breaks {
                // one representative per run: the smallest original index
                let representative = order[run_start..=i].iter().copied().min().expect("non-empty run");
                kept.push(representative);
                run_start = i + 1;
            }
        }

        if kept.len() < n {
            issue_warning!(
                "removed {} duplicate site(s) arising from partial occupancies",
                n - kept.len()
            );
        }
        kept.sort_unstable();
        self.keep_atoms(&kept)
    }

    /// Removes every site participating in a pair at periodic distance
    /// below 0.55 Å.
    pub fn prune_collisions(&self) -> CifRecord {
        let n = self.natoms();
        let mut colliding = vec![false; n];
        for i in 0..n {
            for k in (i + 1)..n {
                if self.cell.periodic_distance(&self.pos[i], &self.pos[k]) < COLLISION_RADIUS {
                    colliding[i] = true;
                    colliding[k] = true;
                }
            }
        }

        let kept: Vec<usize> = (0..n).filter(|&i| !colliding[i]).collect();
        if kept.len() < n {
            issue_warning!(
                "removed {} site(s) closer than {} Å to a neighbour",
                n - kept.len(),
                COLLISION_RADIUS
            );
        }
        self.keep_atoms(&kept)
    }

    /// Applies every equivalent position of the cell to the record.
    ///
    /// Each image is folded into the unit cube and either identified with
    /// an existing site (periodic distance < 0.5 Å) or appended with the
    /// element of its preimage; bonds are transported along the images.
    /// Finishes with a collision pruning pass.
    pub fn expand_symmetry(&self) -> CifRecord {
        let mut pos = self.pos.clone();
        let mut ids = self.ids.clone();

        let mut bond_set: BTreeSet<(usize, usize)> = BTreeSet::new();
        for i in 0..self.natoms() {
            for k in (i + 1)..self.natoms() {
                if self.bonds[i][k] {
                    bond_set.insert((i, k));
                }
            }
        }

        for equivalent in &self.cell.equivalents {
            let sweep_size = pos.len();
            let mut image = vec![0usize; sweep_size];
            for v in 0..sweep_size {
                let p = equivalent.apply(&pos[v]).map(|x| x - x.floor());
                match (0..pos.len())
                    .find(|&w| self.cell.periodic_distance(&pos[w], &p) < IMAGE_MERGE_RADIUS)
                {
                    Some(existing) => image[v] = existing,
                    None => {
                        pos.push(p);
                        ids.push(ids[v]);
                        image[v] = pos.len() - 1;
                    }
                }
            }

            let snapshot: Vec<(usize, usize)> = bond_set.iter().copied().collect();
            for (i, k) in snapshot {
                let (a, b) = (image[i].min(image[k]), image[i].max(image[k]));
                if a != b {
                    bond_set.insert((a, b));
                }
            }
        }

        let n = pos.len();
        let mut bonds = vec![vec![false; n]; n];
        for (i, k) in bond_set {
            bonds[i][k] = true;
            bonds[k][i] = true;
        }

        let expanded = CifRecord {
            metadata: self.metadata.clone(),
            cell: self.cell.clone(),
            types: self.types.clone(),
            ids,
            pos,
            bonds,
        };
        expanded.prune_collisions()
    }

    /// Restricts the record to the given sites (ascending indices),
    /// dropping palette entries no longer referenced and remapping ids
    /// densely.
    pub fn keep_atoms(&self, keep: &[usize]) -> CifRecord {
        let mut palette_used = vec![false; self.types.len()];
        for &site in keep {
            palette_used[self.ids[site]] = true;
        }

        let mut palette_map = vec![usize::MAX; self.types.len()];
        let mut types = Vec::new();
        for (old, used) in palette_used.iter().enumerate() {
            if *used {
                palette_map[old] = types.len();
                types.push(self.types[old].clone());
            }
        }

        let ids = keep.iter().map(|&site| palette_map[self.ids[site]]).collect();
        let pos = keep.iter().map(|&site| self.pos[site]).collect();
        let bonds = keep
            .iter()
            .map(|&i| keep.iter().map(|&k| self.bonds[i][k]).collect())
            .collect();

        CifRecord {
            metadata: self.metadata.clone(),
            cell: self.cell.clone(),
            types,
            ids,
            pos,
            bonds,
        }
    }
}

fn lex_cmp(a: &Vector3<f64>, b: &Vector3<f64>) -> std::cmp::Ordering {
    for i in 0..3 {
        match a[i].partial_cmp(&b[i]).expect("fractional coordinates are finite") {
            std::cmp::Ordering::Equal => continue,
            other => return other,
        }
    }
    std::cmp::Ordering::Equal
}
