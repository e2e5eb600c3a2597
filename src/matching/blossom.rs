//! Edmonds' weighted blossom algorithm (primal-dual), following the presentation in
//! "Efficient Algorithms for Finding Maximum Matching in Graphs" by Zvi Galil (1986).
//!
//! The solver computes a maximum-weight matching among all maximum-cardinality matchings of a
//! general graph in `O(n^3)`. A minimum-weight perfect matching of a complete graph on an even
//! number of vertices is obtained by running it on the inverted weights `W - w(e)` with
//! `W > max w(e)`: every perfect matching has the same number of edges, so maximizing the
//! inverted weight minimizes the original one.
//!
//! Terminology (S-/T-vertices, sub-blossoms, ...) follows Galil's paper. Vertex dual variables and
//! slacks are stored pre-multiplied by two.

use log::{debug, trace};

use super::*;

/// Default oracle: exact minimum-weight perfect matching via the blossom algorithm
#[derive(Clone, Copy, Debug, Default)]
pub struct BlossomMatcher;

impl MatchingOracle for BlossomMatcher {
    fn name(&self) -> &'static str {
        "blossom"
    }

    fn solve_min_weight_perfect_matching(
        &self,
        graph: &Subgraph,
    ) -> Result<Vec<Edge>, OracleError> {
        let k = graph.number_of_nodes();
        if k % 2 == 1 {
            return Err(OracleError::OddVertexCount { count: k });
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let offset = graph.max_weight() + 1.0;
        let edges = graph
            .edges()
            .map(|WeightedEdge(u, v, w)| (u as usize, v as usize, offset - w))
            .collect();

        let mate = WeightedMatching::new(k as usize, edges).solve_max_cardinality();

        let pairs: Vec<Edge> = mate
            .iter()
            .enumerate()
            .filter(|&(u, &v)| v != NIL && u < v)
            .map(|(u, &v)| Edge(u as Node, v as Node))
            .collect();

        debug!(
            "blossom matching paired {} of {k} vertices",
            2 * pairs.len()
        );

        Ok(pairs)
    }
}

const NIL: usize = usize::MAX;

/// Top-level blossom labels
const FREE: u8 = 0;
const S_LABEL: u8 = 1;
const T_LABEL: u8 = 2;
/// Marker set on S-blossoms while tracing back alternating paths
const BREADCRUMB: u8 = 4;

/// Python-style indexing: negative `j` counts from the back
#[inline]
fn wrapped(list: &[usize], j: isize) -> usize {
    if j < 0 {
        list[(list.len() as isize + j) as usize]
    } else {
        list[j as usize]
    }
}

/// Solver state. Vertices are numbered `0..n`, non-trivial blossoms `n..2n`. Edge `k` has the
/// endpoints `2k` and `2k + 1`.
struct WeightedMatching {
    n: usize,
    edges: Vec<(usize, usize, Weight)>,

    /// `endpoint[p]` is the vertex to which endpoint `p` is attached
    endpoint: Vec<usize>,
    /// `neighbend[v]` lists the remote endpoints of all edges incident to `v`
    neighbend: Vec<Vec<usize>>,

    /// `mate[v]` is the remote endpoint of the matched edge of `v` or `NIL`
    mate: Vec<usize>,
    /// Label of top-level blossoms; for vertices inside a T-blossom `T_LABEL` means the vertex
    /// is reachable from an S-vertex outside the blossom
    label: Vec<u8>,
    /// Remote endpoint of the edge through which the blossom (vertex) got its label
    labelend: Vec<usize>,
    /// Top-level blossom containing each vertex
    inblossom: Vec<usize>,
    blossomparent: Vec<usize>,
    /// Sub-blossoms of a non-trivial blossom, starting at the base and going round
    blossomchilds: Vec<Vec<usize>>,
    blossombase: Vec<usize>,
    /// `blossomendps[b][i]` is the local endpoint of `blossomchilds[b][i]` on the edge connecting
    /// it to `blossomchilds[b][i + 1]`
    blossomendps: Vec<Vec<usize>>,
    /// Least-slack edge to an S-vertex (free vertices) or to another S-blossom (S-blossoms)
    bestedge: Vec<usize>,
    /// Least-slack edges of a non-trivial S-blossom to neighbouring S-blossoms, if computed
    blossombestedges: Vec<Option<Vec<usize>>>,
    unusedblossoms: Vec<usize>,
    /// `2 * u(v)` for vertices, `z(b)` for blossoms
    dualvar: Vec<Weight>,
    /// Edges known to have zero slack
    allowedge: Vec<bool>,
    /// Newly discovered S-vertices
    queue: Vec<usize>,
}

impl WeightedMatching {
    fn new(n: usize, edges: Vec<(usize, usize, Weight)>) -> Self {
        let max_weight = edges.iter().map(|e| e.2).fold(0.0, Weight::max);

        let endpoint = (0..2 * edges.len())
            .map(|p| {
                let (i, j, _) = edges[p / 2];
                if p % 2 == 0 { i } else { j }
            })
            .collect();

        let mut neighbend = vec![Vec::new(); n];
        for (k, &(i, j, _)) in edges.iter().enumerate() {
            debug_assert_ne!(i, j);
            neighbend[i].push(2 * k + 1);
            neighbend[j].push(2 * k);
        }

        let mut blossombase: Vec<usize> = (0..n).collect();
        blossombase.resize(2 * n, NIL);

        let mut dualvar = vec![max_weight; n];
        dualvar.resize(2 * n, 0.0);

        let number_of_edges = edges.len();

        Self {
            n,
            edges,
            endpoint,
            neighbend,
            mate: vec![NIL; n],
            label: vec![FREE; 2 * n],
            labelend: vec![NIL; 2 * n],
            inblossom: (0..n).collect(),
            blossomparent: vec![NIL; 2 * n],
            blossomchilds: vec![Vec::new(); 2 * n],
            blossombase,
            blossomendps: vec![Vec::new(); 2 * n],
            bestedge: vec![NIL; 2 * n],
            blossombestedges: vec![None; 2 * n],
            unusedblossoms: (n..2 * n).collect(),
            dualvar,
            allowedge: vec![false; number_of_edges],
            queue: Vec::new(),
        }
    }

    /// Returns `2 * slack` of edge k (does not work inside blossoms)
    #[inline]
    fn slack(&self, k: usize) -> Weight {
        let (i, j, w) = self.edges[k];
        self.dualvar[i] + self.dualvar[j] - 2.0 * w
    }

    fn blossom_leaves(&self, b: usize) -> Vec<usize> {
        let mut leaves = Vec::new();
        self.collect_leaves(b, &mut leaves);
        leaves
    }

    fn collect_leaves(&self, b: usize, leaves: &mut Vec<usize>) {
        if b < self.n {
            leaves.push(b);
        } else {
            for &t in &self.blossomchilds[b] {
                self.collect_leaves(t, leaves);
            }
        }
    }

    /// Assigns label `t` to the top-level blossom containing vertex `w`, which was reached
    /// through the edge with remote endpoint `p`.
    fn assign_label(&mut self, w: usize, t: u8, p: usize) {
        let b = self.inblossom[w];
        debug_assert!(self.label[w] == FREE && self.label[b] == FREE);

        self.label[w] = t;
        self.label[b] = t;
        self.labelend[w] = p;
        self.labelend[b] = p;
        self.bestedge[w] = NIL;
        self.bestedge[b] = NIL;

        if t == S_LABEL {
            let leaves = self.blossom_leaves(b);
            self.queue.extend(leaves);
        } else if t == T_LABEL {
            // the base is the only vertex of b with an external mate; it becomes an S-vertex
            let base = self.blossombase[b];
            let mbase = self.mate[base];
            debug_assert_ne!(mbase, NIL);
            self.assign_label(self.endpoint[mbase], S_LABEL, mbase ^ 1);
        }
    }

    /// Traces back from `v` and `w` to discover either a new blossom or an augmenting path.
    /// Returns the base vertex of the new blossom, or `NIL` for an augmenting path.
    fn scan_blossom(&mut self, mut v: usize, mut w: usize) -> usize {
        let mut path = Vec::new();
        let mut base = NIL;

        while v != NIL {
            let mut b = self.inblossom[v];
            if self.label[b] & BREADCRUMB != 0 {
                base = self.blossombase[b];
                break;
            }

            debug_assert_eq!(self.label[b], S_LABEL);
            path.push(b);
            self.label[b] = S_LABEL | BREADCRUMB;

            if self.labelend[b] == NIL {
                // the base of b is single; stop tracing this path
                v = NIL;
            } else {
                v = self.endpoint[self.labelend[b]];
                b = self.inblossom[v];
                debug_assert_eq!(self.label[b], T_LABEL);
                v = self.endpoint[self.labelend[b]];
            }

            // alternate between both paths
            if w != NIL {
                std::mem::swap(&mut v, &mut w);
            }
        }

        for b in path {
            self.label[b] = S_LABEL;
        }

        base
    }

    /// Constructs a new S-blossom with the given base containing edge `k`, which connects a pair
    /// of S-vertices.
    fn add_blossom(&mut self, base: usize, k: usize) {
        let (mut v, mut w, _) = self.edges[k];
        let bb = self.inblossom[base];
        let mut bv = self.inblossom[v];
        let mut bw = self.inblossom[w];

        let b = self
            .unusedblossoms
            .pop()
            .expect("there are at most n/2 non-trivial blossoms");
        self.blossombase[b] = base;
        self.blossomparent[b] = NIL;
        self.blossomparent[bb] = b;

        let mut path = Vec::new();
        let mut endps = Vec::new();

        // trace back from v to base
        while bv != bb {
            self.blossomparent[bv] = b;
            path.push(bv);
            endps.push(self.labelend[bv]);
            v = self.endpoint[self.labelend[bv]];
            bv = self.inblossom[v];
        }

        path.push(bb);
        path.reverse();
        endps.reverse();
        endps.push(2 * k);

        // trace back from w to base
        while bw != bb {
            self.blossomparent[bw] = b;
            path.push(bw);
            endps.push(self.labelend[bw] ^ 1);
            w = self.endpoint[self.labelend[bw]];
            bw = self.inblossom[w];
        }

        debug_assert_eq!(self.label[bb], S_LABEL);
        self.label[b] = S_LABEL;
        self.labelend[b] = self.labelend[bb];
        self.dualvar[b] = 0.0;

        for leaf in self.blossom_leaves_of_children(&path) {
            if self.label[self.inblossom[leaf]] == T_LABEL {
                // T-vertices turn into S-vertices as they become part of an S-blossom
                self.queue.push(leaf);
            }
            self.inblossom[leaf] = b;
        }

        // compute the least-slack edges to neighbouring S-blossoms
        let mut bestedgeto = vec![NIL; 2 * self.n];
        for &sub in &path {
            let nblists: Vec<Vec<usize>> = match self.blossombestedges[sub].take() {
                Some(list) => vec![list],
                None => self
                    .blossom_leaves(sub)
                    .into_iter()
                    .map(|leaf| self.neighbend[leaf].iter().map(|p| p / 2).collect())
                    .collect(),
            };

            for k in nblists.into_iter().flatten() {
                let (mut i, mut j, _) = self.edges[k];
                if self.inblossom[j] == b {
                    std::mem::swap(&mut i, &mut j);
                }
                let bj = self.inblossom[j];
                if bj != b
                    && self.label[bj] == S_LABEL
                    && (bestedgeto[bj] == NIL || self.slack(k) < self.slack(bestedgeto[bj]))
                {
                    bestedgeto[bj] = k;
                }
            }

            self.bestedge[sub] = NIL;
        }

        let best_edges: Vec<usize> = bestedgeto.into_iter().filter(|&k| k != NIL).collect();
        self.bestedge[b] = NIL;
        for &k in &best_edges {
            if self.bestedge[b] == NIL || self.slack(k) < self.slack(self.bestedge[b]) {
                self.bestedge[b] = k;
            }
        }
        self.blossombestedges[b] = Some(best_edges);

        self.blossomchilds[b] = path;
        self.blossomendps[b] = endps;

        trace!("created blossom {b} with base {base}");
    }

    fn blossom_leaves_of_children(&self, children: &[usize]) -> Vec<usize> {
        let mut leaves = Vec::new();
        for &c in children {
            self.collect_leaves(c, &mut leaves);
        }
        leaves
    }

    /// Expands the given top-level blossom
    fn expand_blossom(&mut self, b: usize, endstage: bool) {
        // convert sub-blossoms into top-level blossoms
        for s in self.blossomchilds[b].clone() {
            self.blossomparent[s] = NIL;
            if s < self.n {
                self.inblossom[s] = s;
            } else if endstage && self.dualvar[s] == 0.0 {
                self.expand_blossom(s, endstage);
            } else {
                for leaf in self.blossom_leaves(s) {
                    self.inblossom[leaf] = s;
                }
            }
        }

        // an expanding T-blossom requires its sub-blossoms to be relabeled
        if !endstage && self.label[b] == T_LABEL {
            debug_assert_ne!(self.labelend[b], NIL);
            let entrychild = self.inblossom[self.endpoint[self.labelend[b] ^ 1]];
            let childs = self.blossomchilds[b].clone();
            let endps = self.blossomendps[b].clone();

            // decide in which direction we go round the blossom
            let mut j = childs
                .iter()
                .position(|&c| c == entrychild)
                .expect("entry child belongs to the blossom") as isize;
            let (jstep, endptrick): (isize, usize) = if j & 1 == 1 {
                // odd start index: go forward and wrap
                j -= childs.len() as isize;
                (1, 0)
            } else {
                // even start index: go backward
                (-1, 1)
            };

            // move along the blossom until we get to the base
            let mut p = self.labelend[b];
            while j != 0 {
                // relabel the T-sub-blossom
                self.label[self.endpoint[p ^ 1]] = FREE;
                let q = wrapped(&endps, j - endptrick as isize);
                self.label[self.endpoint[q ^ endptrick ^ 1]] = FREE;
                self.assign_label(self.endpoint[p ^ 1], T_LABEL, p);

                // step to the next S-sub-blossom and note its forward endpoint
                self.allowedge[q / 2] = true;
                j += jstep;
                p = wrapped(&endps, j - endptrick as isize) ^ endptrick;

                // step to the next T-sub-blossom
                self.allowedge[p / 2] = true;
                j += jstep;
            }

            // relabel the base T-sub-blossom without stepping through to its mate
            let bv = wrapped(&childs, j);
            let ep = self.endpoint[p ^ 1];
            self.label[ep] = T_LABEL;
            self.label[bv] = T_LABEL;
            self.labelend[ep] = p;
            self.labelend[bv] = p;
            self.bestedge[bv] = NIL;

            // continue along the blossom until we get back to entrychild
            j += jstep;
            while wrapped(&childs, j) != entrychild {
                let bv = wrapped(&childs, j);
                if self.label[bv] == S_LABEL {
                    // this sub-blossom just got label S through one of its neighbours
                    j += jstep;
                    continue;
                }

                // label the sub-blossom T if it contains a vertex reachable from outside
                let reached = self
                    .blossom_leaves(bv)
                    .into_iter()
                    .find(|&v| self.label[v] != FREE);
                if let Some(v) = reached {
                    debug_assert_eq!(self.label[v], T_LABEL);
                    debug_assert_eq!(self.inblossom[v], bv);
                    self.label[v] = FREE;
                    let base_mate = self.mate[self.blossombase[bv]];
                    self.label[self.endpoint[base_mate]] = FREE;
                    self.assign_label(v, T_LABEL, self.labelend[v]);
                }
                j += jstep;
            }
        }

        // recycle the blossom number
        self.label[b] = FREE;
        self.labelend[b] = NIL;
        self.blossomchilds[b].clear();
        self.blossomendps[b].clear();
        self.blossombase[b] = NIL;
        self.blossombestedges[b] = None;
        self.bestedge[b] = NIL;
        self.unusedblossoms.push(b);

        trace!("expanded blossom {b} (end of stage: {endstage})");
    }

    /// Swaps matched and unmatched edges over an alternating path through blossom `b` between
    /// vertex `v` and the base vertex.
    fn augment_blossom(&mut self, b: usize, v: usize) {
        // bubble up from v to an immediate sub-blossom of b
        let mut t = v;
        while self.blossomparent[t] != b {
            t = self.blossomparent[t];
        }
        if t >= self.n {
            self.augment_blossom(t, v);
        }

        let i = self.blossomchilds[b]
            .iter()
            .position(|&c| c == t)
            .expect("sub-blossom belongs to the blossom");
        let mut j = i as isize;
        let (jstep, endptrick): (isize, usize) = if i & 1 == 1 {
            j -= self.blossomchilds[b].len() as isize;
            (1, 0)
        } else {
            (-1, 1)
        };

        // move along the blossom until we get to the base
        while j != 0 {
            j += jstep;
            let t = wrapped(&self.blossomchilds[b], j);
            let p = wrapped(&self.blossomendps[b], j - endptrick as isize) ^ endptrick;
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p]);
            }

            j += jstep;
            let t = wrapped(&self.blossomchilds[b], j);
            if t >= self.n {
                self.augment_blossom(t, self.endpoint[p ^ 1]);
            }

            // match the edge connecting those sub-blossoms
            self.mate[self.endpoint[p]] = p ^ 1;
            self.mate[self.endpoint[p ^ 1]] = p;
        }

        // rotate the sub-blossoms such that the new base is at the front
        self.blossomchilds[b].rotate_left(i);
        self.blossomendps[b].rotate_left(i);
        self.blossombase[b] = self.blossombase[self.blossomchilds[b][0]];
        debug_assert_eq!(self.blossombase[b], v);
    }

    /// Swaps matched and unmatched edges over an alternating path between two single vertices.
    /// The path runs through edge `k`, which connects a pair of S-vertices.
    fn augment_matching(&mut self, k: usize) {
        let (v, w, _) = self.edges[k];

        for (mut s, mut p) in [(v, 2 * k + 1), (w, 2 * k)] {
            // match s to remote endpoint p, then trace back from s until a single vertex is
            // found, swapping matched and unmatched edges on the way
            loop {
                let bs = self.inblossom[s];
                debug_assert_eq!(self.label[bs], S_LABEL);
                if bs >= self.n {
                    self.augment_blossom(bs, s);
                }
                self.mate[s] = p;

                if self.labelend[bs] == NIL {
                    break;
                }

                let t = self.endpoint[self.labelend[bs]];
                let bt = self.inblossom[t];
                debug_assert_eq!(self.label[bt], T_LABEL);
                debug_assert_eq!(self.blossombase[bt], t);

                s = self.endpoint[self.labelend[bt]];
                let j = self.endpoint[self.labelend[bt] ^ 1];
                if bt >= self.n {
                    self.augment_blossom(bt, j);
                }
                self.mate[j] = self.labelend[bt];

                // the opposite endpoint is assigned to mate[s] in the next iteration
                p = self.labelend[bt] ^ 1;
            }
        }
    }

    /// Scans the neighbourhood of S-vertex `v`. Returns true if the matching was augmented.
    fn scan_vertex(&mut self, v: usize) -> bool {
        debug_assert_eq!(self.label[self.inblossom[v]], S_LABEL);

        for idx in 0..self.neighbend[v].len() {
            let p = self.neighbend[v][idx];
            let k = p / 2;
            let w = self.endpoint[p];

            if self.inblossom[v] == self.inblossom[w] {
                // edge internal to a blossom
                continue;
            }

            let mut kslack = 0.0;
            if !self.allowedge[k] {
                kslack = self.slack(k);
                if kslack <= 0.0 {
                    self.allowedge[k] = true;
                }
            }

            if self.allowedge[k] {
                if self.label[self.inblossom[w]] == FREE {
                    // w is free: label w with T and its mate with S
                    self.assign_label(w, T_LABEL, p ^ 1);
                } else if self.label[self.inblossom[w]] == S_LABEL {
                    // w is an S-vertex in another blossom: new blossom or augmenting path
                    let base = self.scan_blossom(v, w);
                    if base != NIL {
                        self.add_blossom(base, k);
                    } else {
                        self.augment_matching(k);
                        return true;
                    }
                } else if self.label[w] == FREE {
                    // w is inside a T-blossom but not yet reached from outside; mark it as
                    // reached for a later relabeling during T-blossom expansion
                    debug_assert_eq!(self.label[self.inblossom[w]], T_LABEL);
                    self.label[w] = T_LABEL;
                    self.labelend[w] = p ^ 1;
                }
            } else if self.label[self.inblossom[w]] == S_LABEL {
                // least-slack non-allowable edge to a different S-blossom
                let b = self.inblossom[v];
                if self.bestedge[b] == NIL || kslack < self.slack(self.bestedge[b]) {
                    self.bestedge[b] = k;
                }
            } else if self.label[w] == FREE {
                // least-slack edge reaching the free vertex w
                if self.bestedge[w] == NIL || kslack < self.slack(self.bestedge[w]) {
                    self.bestedge[w] = k;
                }
            }
        }

        false
    }

    /// Runs the primal-dual method until no augmenting path remains and returns `mate`, where
    /// `mate[v]` is the vertex matched to `v` or `NIL`.
    fn solve_max_cardinality(mut self) -> Vec<usize> {
        if self.edges.is_empty() {
            return self.mate;
        }

        let n = self.n;
        for stage in 0..n {
            // each stage finds one augmenting path
            self.label.fill(FREE);
            self.bestedge.fill(NIL);
            for b in n..2 * n {
                self.blossombestedges[b] = None;
            }
            self.allowedge.fill(false);
            self.queue.clear();

            for v in 0..n {
                if self.mate[v] == NIL && self.label[self.inblossom[v]] == FREE {
                    self.assign_label(v, S_LABEL, NIL);
                }
            }

            let mut augmented = false;
            loop {
                while !augmented {
                    let Some(v) = self.queue.pop() else {
                        break;
                    };
                    augmented = self.scan_vertex(v);
                }

                if augmented {
                    break;
                }

                // no augmenting path under the current duals; compute delta and pump slack out
                // of the dual variables
                if !self.update_duals() {
                    break;
                }
            }

            if !augmented {
                trace!("no augmenting path in stage {stage}");
                break;
            }

            // expand all top-level S-blossoms with zero dual
            for b in n..2 * n {
                if self.blossomparent[b] == NIL
                    && self.blossombase[b] != NIL
                    && self.label[b] == S_LABEL
                    && self.dualvar[b] == 0.0
                {
                    self.expand_blossom(b, true);
                }
            }
        }

        // translate remote endpoints into vertices
        for v in 0..n {
            if self.mate[v] != NIL {
                self.mate[v] = self.endpoint[self.mate[v]];
            }
        }
        debug_assert!((0..n).all(|v| self.mate[v] == NIL || self.mate[self.mate[v]] == v));

        self.mate
    }

    /// Performs one dual update. Returns false if the optimum has been reached.
    fn update_duals(&mut self) -> bool {
        enum Delta {
            None,
            Optimum,
            FreeEdge(usize),
            BlossomEdge(usize),
            Expand(usize),
        }

        let n = self.n;
        let mut kind = Delta::None;
        let mut delta = 0.0;

        // delta2: minimum slack on any edge between an S-vertex and a free vertex
        for v in 0..n {
            if self.label[self.inblossom[v]] == FREE && self.bestedge[v] != NIL {
                let d = self.slack(self.bestedge[v]);
                if matches!(kind, Delta::None) || d < delta {
                    delta = d;
                    kind = Delta::FreeEdge(self.bestedge[v]);
                }
            }
        }

        // delta3: half the minimum slack on any edge between a pair of S-blossoms
        for b in 0..2 * n {
            if self.blossomparent[b] == NIL && self.label[b] == S_LABEL && self.bestedge[b] != NIL
            {
                let d = self.slack(self.bestedge[b]) / 2.0;
                if matches!(kind, Delta::None) || d < delta {
                    delta = d;
                    kind = Delta::BlossomEdge(self.bestedge[b]);
                }
            }
        }

        // delta4: minimum z variable of any T-blossom
        for b in n..2 * n {
            if self.blossombase[b] != NIL
                && self.blossomparent[b] == NIL
                && self.label[b] == T_LABEL
                && (matches!(kind, Delta::None) || self.dualvar[b] < delta)
            {
                delta = self.dualvar[b];
                kind = Delta::Expand(b);
            }
        }

        if matches!(kind, Delta::None) {
            // maximum cardinality reached; final update keeps the duals feasible
            kind = Delta::Optimum;
            delta = self.dualvar[..n]
                .iter()
                .copied()
                .fold(Weight::INFINITY, Weight::min)
                .max(0.0);
        }

        for v in 0..n {
            match self.label[self.inblossom[v]] {
                S_LABEL => self.dualvar[v] -= delta,
                T_LABEL => self.dualvar[v] += delta,
                _ => {}
            }
        }
        for b in n..2 * n {
            if self.blossombase[b] != NIL && self.blossomparent[b] == NIL {
                match self.label[b] {
                    S_LABEL => self.dualvar[b] += delta,
                    T_LABEL => self.dualvar[b] -= delta,
                    _ => {}
                }
            }
        }

        match kind {
            Delta::None | Delta::Optimum => return false,
            Delta::FreeEdge(k) => {
                self.allowedge[k] = true;
                let (i, j, _) = self.edges[k];
                let s = if self.label[self.inblossom[i]] == FREE {
                    j
                } else {
                    i
                };
                debug_assert_eq!(self.label[self.inblossom[s]], S_LABEL);
                self.queue.push(s);
            }
            Delta::BlossomEdge(k) => {
                self.allowedge[k] = true;
                let (i, _, _) = self.edges[k];
                debug_assert_eq!(self.label[self.inblossom[i]], S_LABEL);
                self.queue.push(i);
            }
            Delta::Expand(b) => self.expand_blossom(b, false),
        }

        true
    }
}
