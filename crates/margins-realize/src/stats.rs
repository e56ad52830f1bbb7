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

use std::time::Duration;

/// Statistics collected while generating one matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationStatistics {
    /// Number of rows `R`.
    pub rows: usize,
    /// Number of columns `C`.
    pub columns: usize,
    /// Number of ones placed, equal to the total of either margin.
    pub ones: usize,
    /// Number of Gale–Ryser prefix inequalities evaluated.
    pub prefix_checks: usize,
    /// Time spent validating the margins.
    pub time_validation: Duration,
    /// Time spent in the feasibility test.
    pub time_feasibility: Duration,
    /// Time spent constructing (and verifying) the matrix.
    pub time_construction: Duration,
    /// Total time of the request.
    pub time_total: Duration,
}

impl GenerationStatistics {
    /// Returns the share of one-entries in the matrix, or `0.0` for an empty grid.
    #[inline]
    pub fn density(&self) -> f64 {
        let cells = self.rows * self.columns;
        if cells == 0 {
            return 0.0;
        }
        self.ones as f64 / cells as f64
    }
}

impl std::fmt::Display for GenerationStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Margins Generation Statistics:")?;
        writeln!(f, "  Shape:                {}x{}", self.rows, self.columns)?;
        writeln!(f, "  Ones placed:          {}", self.ones)?;
        writeln!(f, "  Density:              {:.3}", self.density())?;
        writeln!(f, "  Prefix checks:        {}", self.prefix_checks)?;
        writeln!(f, "  Validation time:      {:.2?}", self.time_validation)?;
        writeln!(f, "  Feasibility time:     {:.2?}", self.time_feasibility)?;
        writeln!(f, "  Construction time:    {:.2?}", self.time_construction)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_density() {
        let stats = GenerationStatistics {
            rows: 2,
            columns: 4,
            ones: 2,
            ..Default::default()
        };
        assert_eq!(stats.density(), 0.25);
        assert_eq!(GenerationStatistics::default().density(), 0.0);
    }

    #[test]
    fn test_display_lists_counters() {
        let stats = GenerationStatistics {
            rows: 3,
            columns: 3,
            ones: 6,
            prefix_checks: 3,
            ..Default::default()
        };
        let text = stats.to_string();
        assert!(text.starts_with("Margins Generation Statistics:\n"));
        assert!(text.contains("  Shape:                3x3\n"));
        assert!(text.contains("  Ones placed:          6\n"));
        assert!(text.contains("  Prefix checks:        3\n"));
    }
}
