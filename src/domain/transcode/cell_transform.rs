// ============================================================
// CELL TRANSFORM
// ============================================================
// Line-break flattening followed by symbol naming, per cell

use super::SymbolTable;

/// Literal two-character marker written in place of a line break
pub const LINE_BREAK_MARKER: &str = "\\n";

/// Counters accumulated while transforming cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellStats {
    pub cells: usize,
    pub line_breaks: usize,
    pub symbols: usize,
}

impl CellStats {
    pub fn absorb(&mut self, other: CellStats) {
        self.cells += other.cells;
        self.line_breaks += other.line_breaks;
        self.symbols += other.symbols;
    }
}

/// Replace `\r\n`, then lone `\n`, then lone `\r` with the literal marker.
/// Returns the flattened text and the number of line breaks replaced.
pub fn normalize_line_breaks(cell: &str) -> (String, usize) {
    if !cell.contains(&['\r', '\n'][..]) {
        return (cell.to_string(), 0);
    }

    let crlf = cell.matches("\r\n").count();
    let step = cell.replace("\r\n", LINE_BREAK_MARKER);
    let lf = step.matches('\n').count();
    let step = step.replace('\n', LINE_BREAK_MARKER);
    let cr = step.matches('\r').count();
    let flattened = step.replace('\r', LINE_BREAK_MARKER);

    (flattened, crlf + lf + cr)
}

/// Applies the fixed per-cell pipeline against a borrowed symbol table
#[derive(Debug, Clone, Copy)]
pub struct CellTransformer<'a> {
    symbols: &'a SymbolTable,
}

impl<'a> CellTransformer<'a> {
    pub fn new(symbols: &'a SymbolTable) -> Self {
        Self { symbols }
    }

    pub fn transform(&self, cell: &str) -> (String, CellStats) {
        let (flattened, line_breaks) = normalize_line_breaks(cell);
        let (named, symbols) = self.symbols.substitute(&flattened);
        (
            named,
            CellStats {
                cells: 1,
                line_breaks,
                symbols,
            },
        )
    }

    /// Transform a whole row, preserving cell count and order
    pub fn transform_row<'r, I>(&self, row: I) -> (Vec<String>, CellStats)
    where
        I: IntoIterator<Item = &'r str>,
    {
        let mut stats = CellStats::default();
        let cells = row
            .into_iter()
            .map(|cell| {
                let (out, cell_stats) = self.transform(cell);
                stats.absorb(cell_stats);
                out
            })
            .collect();
        (cells, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_all_break_variants() {
        let (text, count) = normalize_line_breaks("a\r\nb\nc\rd");
        assert_eq!(text, "a\\nb\\nc\\nd");
        assert_eq!(count, 3);
    }

    #[test]
    fn test_normalize_lf_cr_is_two_breaks() {
        // "\n\r" is not a CRLF pair
        let (text, count) = normalize_line_breaks("x\n\ry");
        assert_eq!(text, "x\\n\\ny");
        assert_eq!(count, 2);
    }

    #[test]
    fn test_normalize_leaves_plain_text() {
        let (text, count) = normalize_line_breaks("no breaks, \"quoted\"");
        assert_eq!(text, "no breaks, \"quoted\"");
        assert_eq!(count, 0);
    }

    #[test]
    fn test_transform_example_cell() {
        let table = SymbolTable::from_entries([("😀", "grinning_face")]);
        let transformer = CellTransformer::new(&table);

        let (cell, stats) = transformer.transform("Hello😀\r\nWorld");

        assert_eq!(cell, "Hello:grinning_face:\\nWorld");
        assert!(!cell.contains(&['\r', '\n'][..]));
        assert_eq!(
            stats,
            CellStats {
                cells: 1,
                line_breaks: 1,
                symbols: 1
            }
        );
    }

    #[test]
    fn test_transform_row_preserves_shape() {
        let table = SymbolTable::new();
        let transformer = CellTransformer::new(&table);

        let (row, stats) = transformer.transform_row(["a", "", "b\nc"]);

        assert_eq!(row, vec!["a", "", "b\\nc"]);
        assert_eq!(stats.cells, 3);
        assert_eq!(stats.line_breaks, 1);
    }
}
