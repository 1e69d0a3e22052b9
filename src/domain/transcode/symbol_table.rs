// ============================================================
// SYMBOL TABLE
// ============================================================
// Pictographic sequence -> short name lookup, longest match wins

use std::collections::HashMap;

/// Read-only lookup from a symbol sequence to its short name.
///
/// Keys may span several chars (skin tones, ZWJ sequences, flags), so
/// [`SymbolTable::substitute`] always tries the longest candidate at each
/// position first.
#[derive(Debug, Clone, Default)]
pub struct SymbolTable {
    names: HashMap<String, String>,
    max_key_chars: usize,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a table from `(symbol, name)` pairs. Later pairs do not
    /// overwrite earlier ones for the same symbol.
    pub fn from_entries<I, S, N>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, N)>,
        S: Into<String>,
        N: Into<String>,
    {
        let mut table = Self::new();
        for (symbol, name) in entries {
            table.insert(symbol, name);
        }
        table
    }

    pub fn insert(&mut self, symbol: impl Into<String>, name: impl Into<String>) {
        let symbol = symbol.into();
        if symbol.is_empty() || self.names.contains_key(&symbol) {
            return;
        }
        self.max_key_chars = self.max_key_chars.max(symbol.chars().count());
        self.names.insert(symbol, name.into());
    }

    pub fn get(&self, symbol: &str) -> Option<&str> {
        self.names.get(symbol).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Replace every known symbol in `text` with `:name:`.
    /// Returns the new text and how many symbols were replaced.
    pub fn substitute(&self, text: &str) -> (String, usize) {
        if self.is_empty() || text.is_ascii() {
            return (text.to_string(), 0);
        }

        // Byte offsets of every char boundary, end included
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(idx, _)| idx)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let mut out = String::with_capacity(text.len());
        let mut replaced = 0;
        let mut pos = 0;

        while pos < char_count {
            let longest = self.max_key_chars.min(char_count - pos);
            let hit = (1..=longest).rev().find_map(|width| {
                let candidate = &text[boundaries[pos]..boundaries[pos + width]];
                self.get(candidate).map(|name| (width, name))
            });

            match hit {
                Some((width, name)) => {
                    out.push(':');
                    out.push_str(name);
                    out.push(':');
                    replaced += 1;
                    pos += width;
                }
                None => {
                    out.push_str(&text[boundaries[pos]..boundaries[pos + 1]]);
                    pos += 1;
                }
            }
        }

        (out, replaced)
    }
}
