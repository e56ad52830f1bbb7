// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Presentation of a realized matrix.
//!
//! Two views are produced from a `BinaryMatrix`:
//!
//! * `to_latex` typesets the grid as a `bmatrix` environment, one row per
//!   line with entries joined by ` & `, ready for KaTeX or a LaTeX document.
//! * `BipartiteGraph` interprets the grid as a bipartite graph with one node
//!   per row (`r0`, `r1`, ...) and one per column (`c0`, `c1`, ...), joined by
//!   an edge for every one-entry. `to_dot` emits Graphviz DOT with rows on the
//!   left rank and columns on the right.

use crate::{
    index::{ColumnIndex, RowIndex},
    matrix::BinaryMatrix,
};
/// Renders the matrix as a LaTeX `bmatrix`.
///
/// # Examples
///
/// ```rust
/// # use margins_model::{matrix::BinaryMatrix, render::to_latex};
///
/// let m = BinaryMatrix::from_rows(&[[1u8, 0], [0, 1]]);
/// assert_eq!(
///     to_latex(&m),
///     "\\begin{bmatrix}\n1 & 0 \\\\\n0 & 1 \\\\\n\\end{bmatrix}"
/// );
/// ```
pub fn to_latex(matrix: &BinaryMatrix) -> String {
    let mut out = String::from("\\begin{bmatrix}\n");
    for row in matrix.to_rows() {
        let line = row
            .iter()
            .map(|v| v.to_string())
            .collect::<Vec<_>>()
            .join(" & ");
        out.push_str(&line);
        out.push_str(" \\\\\n");
    }
    out.push_str("\\end{bmatrix}");
    out
}

/// An edge between a row node and a column node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub row: RowIndex,
    pub column: ColumnIndex,
}

/// The bipartite graph whose biadjacency matrix is a given `BinaryMatrix`.
///
/// Node degrees equal the matrix margins: row node `i` has degree
/// `row_sum(i)` and column node `j` has degree `column_sum(j)`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BipartiteGraph {
    num_rows: usize,
    num_cols: usize,
    edges: Vec<Edge>, // row-major
}

impl BipartiteGraph {
    /// Builds the graph of `matrix`.
    pub fn from_matrix(matrix: &BinaryMatrix) -> Self {
        Self {
            num_rows: matrix.num_rows(),
            num_cols: matrix.num_cols(),
            edges: matrix
                .ones()
                .map(|(row, column)| Edge { row, column })
                .collect(),
        }
    }

    /// Returns the number of row nodes.
    #[inline]
    pub fn num_row_nodes(&self) -> usize {
        self.num_rows
    }

    /// Returns the number of column nodes.
    #[inline]
    pub fn num_column_nodes(&self) -> usize {
        self.num_cols
    }

    /// Returns all edges in row-major order.
    #[inline]
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Returns the degree of a row node.
    pub fn row_degree(&self, row: RowIndex) -> usize {
        self.edges.iter().filter(|e| e.row == row).count()
    }

    /// Returns the degree of a column node.
    pub fn column_degree(&self, column: ColumnIndex) -> usize {
        self.edges.iter().filter(|e| e.column == column).count()
    }

    /// Returns a view that formats the graph in Graphviz DOT format.
    #[inline]
    pub fn dot(&self) -> Dot<'_> {
        Dot { graph: self }
    }

    /// Renders the graph in Graphviz DOT format.
    #[inline]
    pub fn to_dot(&self) -> String {
        self.dot().to_string()
    }
}

/// Graphviz DOT formatting of a `BipartiteGraph`, see `BipartiteGraph::dot`.
#[derive(Clone, Copy, Debug)]
pub struct Dot<'a> {
    graph: &'a BipartiteGraph,
}

impl std::fmt::Display for Dot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "graph margins {{\n    rankdir=LR;")?;
        writeln!(f, "    subgraph rows {{\n        rank=same;")?;
        for row in RowIndex::range(self.graph.num_rows) {
            writeln!(f, "        r{} [shape=circle];", row.get())?;
        }
        writeln!(f, "    }}\n    subgraph columns {{\n        rank=same;")?;
        for column in ColumnIndex::range(self.graph.num_cols) {
            writeln!(f, "        c{} [shape=box];", column.get())?;
        }
        writeln!(f, "    }}")?;
        for edge in &self.graph.edges {
            writeln!(f, "    r{} -- c{};", edge.row.get(), edge.column.get())?;
        }
        write!(f, "}}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latex_single_row() {
        let m = BinaryMatrix::from_rows(&[[1u8, 1, 1]]);
        assert_eq!(
            to_latex(&m),
            "\\begin{bmatrix}\n1 & 1 & 1 \\\\\n\\end{bmatrix}"
        );
    }

    #[test]
    fn test_graph_edges_follow_ones() {
        let m = BinaryMatrix::from_rows(&[[0u8, 1, 1], [1, 1, 0]]);
        let g = BipartiteGraph::from_matrix(&m);
        assert_eq!(g.num_row_nodes(), 2);
        assert_eq!(g.num_column_nodes(), 3);

        let pairs: Vec<(usize, usize)> = g
            .edges()
            .iter()
            .map(|e| (e.row.get(), e.column.get()))
            .collect();
        assert_eq!(pairs, vec![(0, 1), (0, 2), (1, 0), (1, 1)]);
    }

    #[test]
    fn test_degrees_match_margins() {
        let m = BinaryMatrix::from_rows(&[[0u8, 1, 1], [1, 1, 1], [0, 0, 1]]);
        let g = BipartiteGraph::from_matrix(&m);
        for row in RowIndex::range(m.num_rows()) {
            assert_eq!(g.row_degree(row), m.row_sum(row));
        }
        for column in ColumnIndex::range(m.num_cols()) {
            assert_eq!(g.column_degree(column), m.column_sum(column));
        }
    }

    #[test]
    fn test_dot_output() {
        let m = BinaryMatrix::from_rows(&[[1u8, 0]]);
        let dot = BipartiteGraph::from_matrix(&m).to_dot();

        let mut expected = String::new();
        expected.push_str("graph margins {\n");
        expected.push_str("    rankdir=LR;\n");
        expected.push_str("    subgraph rows {\n");
        expected.push_str("        rank=same;\n");
        expected.push_str("        r0 [shape=circle];\n");
        expected.push_str("    }\n");
        expected.push_str("    subgraph columns {\n");
        expected.push_str("        rank=same;\n");
        expected.push_str("        c0 [shape=box];\n");
        expected.push_str("        c1 [shape=box];\n");
        expected.push_str("    }\n");
        expected.push_str("    r0 -- c0;\n");
        expected.push('}');

        assert_eq!(dot, expected);
    }

    struct CappedWriter {
        written: String,
        capacity: usize,
    }

    impl std::fmt::Write for CappedWriter {
        fn write_str(&mut self, s: &str) -> std::fmt::Result {
            if self.written.len() + s.len() > self.capacity {
                return Err(std::fmt::Error);
            }
            self.written.push_str(s);
            Ok(())
        }
    }

    #[test]
    fn test_dot_view_propagates_writer_errors() {
        use std::fmt::Write;

        let m = BinaryMatrix::from_rows(&[[1u8, 1], [0, 1]]);
        let graph = BipartiteGraph::from_matrix(&m);
        let full = graph.to_dot();

        let mut roomy = CappedWriter {
            written: String::new(),
            capacity: full.len(),
        };
        assert!(write!(roomy, "{}", graph.dot()).is_ok());
        assert_eq!(roomy.written, full);

        let mut cramped = CappedWriter {
            written: String::new(),
            capacity: full.len() / 2,
        };
        assert!(write!(cramped, "{}", graph.dot()).is_err());
        assert!(cramped.written.len() <= full.len() / 2);
    }
}
