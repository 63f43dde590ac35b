//! Union-find (disjoint set union) resolver used by the merge-forest sweep.
//!
//! Internal roots are chosen by rank to keep the trees shallow, while each
//! root carries a separate `label` naming the region's representative cell.
//! The label is what the sweep reports; the internal root is an
//! implementation detail that can differ from it.

#[derive(Clone, Debug)]
pub(super) struct DisjointSet {
    parent: Vec<usize>,
    rank: Vec<u8>,
    label: Vec<usize>,
}

impl DisjointSet {
    pub(super) fn new(n: usize) -> Self {
        Self {
            parent: (0..n).collect(),
            rank: vec![0; n],
            label: (0..n).collect(),
        }
    }

    pub(super) fn find(&mut self, mut node: usize) -> usize {
        let mut root = node;
        while self.parent[root] != root {
            root = self.parent[root];
        }

        while self.parent[node] != node {
            let parent = self.parent[node];
            self.parent[node] = root;
            node = parent;
        }

        root
    }

    /// Resolves `node` to the label of its region.
    pub(super) fn representative(&mut self, node: usize) -> usize {
        let root = self.find(node);
        self.label[root]
    }

    /// Merges the regions of `survivor` and `absorbed`; the merged region keeps
    /// the label of `survivor`.
    pub(super) fn union_into(&mut self, survivor: usize, absorbed: usize) -> usize {
        let survivor_root = self.find(survivor);
        let absorbed_root = self.find(absorbed);
        let kept = self.label[survivor_root];
        if survivor_root == absorbed_root {
            return kept;
        }

        let survivor_rank = self.rank[survivor_root];
        let absorbed_rank = self.rank[absorbed_root];
        let (parent, child) = if survivor_rank < absorbed_rank {
            (absorbed_root, survivor_root)
        } else {
            (survivor_root, absorbed_root)
        };
        self.parent[child] = parent;
        if survivor_rank == absorbed_rank {
            self.rank[parent] = survivor_rank.saturating_add(1);
        }
        self.label[parent] = kept;
        kept
    }
}
