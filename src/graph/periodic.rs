use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// One edge of a 3-periodic graph: `src` in the reference cell bonded to
/// the image of `dst` shifted by `offset` cells. The mirror edge
/// `(dst, src, -offset)` is always implicitly present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodicEdge3D {
    pub src: usize,
    pub dst: usize,
    pub offset: Vector3<i32>,
}

impl PeriodicEdge3D {
    pub fn new(src: usize, dst: usize, offset: Vector3<i32>) -> Self {
        PeriodicEdge3D { src, dst, offset }
    }
}

/// A neighbor descriptor: the vertex reached and the lattice offset of its
/// image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Neighbor {
    pub vertex: usize,
    pub offset: Vector3<i32>,
}

/// A multigraph on `{0..n}` whose edges carry ℤ³ lattice offsets.
///
/// Both half-edges are stored, so a self-loop `(v, v, o≠0)` appears twice
/// in `neighbors(v)` and contributes 2 to the degree. Self-loops with a
/// zero offset are forbidden.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PeriodicGraph3D {
    adjacency: Vec<Vec<Neighbor>>,
}

impl PeriodicGraph3D {
    /// An edgeless graph on `n` vertices.
    pub fn new(n: usize) -> Self {
        PeriodicGraph3D {
            adjacency: vec![Vec::new(); n],
        }
    }

    pub fn from_edges<I>(n: usize, edges: I) -> Self
    where
        I: IntoIterator<Item = PeriodicEdge3D>,
    {
        let mut graph = PeriodicGraph3D::new(n);
        for edge in edges {
            graph.add_edge(edge);
        }
        graph.sort_adjacency();
        graph
    }

    /// Number of vertices.
    pub fn nv(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of edges, self-loops counted once.
    pub fn ne(&self) -> usize {
        let half_edges: usize = self.adjacency.iter().map(Vec::len).sum();
        half_edges / 2
    }

    /// Periodic degree of a vertex (a self-loop counts 2).
    pub fn degree(&self, v: usize) -> usize {
        self.adjacency[v].len()
    }

    pub fn neighbors(&self, v: usize) -> &[Neighbor] {
        &self.adjacency[v]
    }

    /// Inserts an edge together with its mirror half-edge.
    pub fn add_edge(&mut self, edge: PeriodicEdge3D) {
        assert!(
            edge.src != edge.dst || edge.offset != Vector3::zeros(),
            "self-loop with zero offset is forbidden"
        );
        self.adjacency[edge.src].push(Neighbor {
            vertex: edge.dst,
            offset: edge.offset,
        });
        self.adjacency[edge.dst].push(Neighbor {
            vertex: edge.src,
            offset: -edge.offset,
        });
    }

    /// Canonical edge list: each edge reported once with `src <= dst`,
    /// self-loops with a lexicographically positive offset.
    pub fn edges(&self) -> Vec<PeriodicEdge3D> {
        let mut edges = Vec::with_capacity(self.ne());
        for (u, neighbors) in self.adjacency.iter().enumerate() {
            for n in neighbors {
                if n.vertex > u || (n.vertex == u && lex_positive(&n.offset)) {
                    edges.push(PeriodicEdge3D::new(u, n.vertex, n.offset));
                }
            }
        }
        edges
    }

    /// Removes the listed vertices and every incident edge, relabelling
    /// the survivors densely. Returns the map from new indices to the
    /// original ones.
    pub fn rem_vertices(&mut self, removed: &[usize]) -> Vec<usize> {
        let n = self.nv();
        let mut keep = vec![true; n];
        for &v in removed {
            keep[v] = false;
        }

        let mut vmap = Vec::with_capacity(n - removed.len());
        let mut relabel = vec![usize::MAX; n];
        for v in 0..n {
            if keep[v] {
                relabel[v] = vmap.len();
                vmap.push(v);
            }
        }

        let old = std::mem::take(&mut self.adjacency);
        self.adjacency = vec![Vec::new(); vmap.len()];
        for (u, neighbors) in old.into_iter().enumerate() {
            if !keep[u] {
                continue;
            }
            self.adjacency[relabel[u]] = neighbors
                .into_iter()
                .filter(|n| keep[n.vertex])
                .map(|n| Neighbor {
                    vertex: relabel[n.vertex],
                    offset: n.offset,
                })
                .collect();
        }
        vmap
    }

    /// Shifts the representative image of each vertex by the given lattice
    /// offset: an edge `(u, v, o)` becomes `(u, v, o + shift[v] - shift[u])`.
    pub fn offset_representatives(&mut self, shifts: &[Vector3<i32>]) {
        assert_eq!(shifts.len(), self.nv(), "one shift per vertex");
        for u in 0..self.adjacency.len() {
            let shift_u = shifts[u];
            for i in 0..self.adjacency[u].len() {
                let n = self.adjacency[u][i];
                self.adjacency[u][i].offset = n.offset + shifts[n.vertex] - shift_u;
            }
        }
    }

    /// Relabels every vertex through a permutation: vertex `v` becomes
    /// `permutation[v]`.
    pub fn relabel(&self, permutation: &[usize]) -> PeriodicGraph3D {
        assert_eq!(permutation.len(), self.nv(), "one image per vertex");
        let mut adjacency = vec![Vec::new(); self.nv()];
        for (u, neighbors) in self.adjacency.iter().enumerate() {
            adjacency[permutation[u]] = neighbors
                .iter()
                .map(|n| Neighbor {
                    vertex: permutation[n.vertex],
                    offset: n.offset,
                })
                .collect();
        }
        let mut graph = PeriodicGraph3D { adjacency };
        graph.sort_adjacency();
        graph
    }

    pub(crate) fn sort_adjacency(&mut self) {
        for neighbors in &mut self.adjacency {
            neighbors.sort_by_key(|n| (n.vertex, n.offset.x, n.offset.y, n.offset.z));
        }
    }
}

fn lex_positive(offset: &Vector3<i32>) -> bool {
    match offset.x.cmp(&0) {
        std::cmp::Ordering::Greater => true,
        std::cmp::Ordering::Less => false,
        std::cmp::Ordering::Equal => match offset.y.cmp(&0) {
            std::cmp::Ordering::Greater => true,
            std::cmp::Ordering::Less => false,
            std::cmp::Ordering::Equal => offset.z > 0,
        },
    }
}
