// ============================================================
// STANDARD EMOJI TABLE
// ============================================================
// CLDR short names from the `emojis` crate, built once per process

use once_cell::sync::Lazy;

use crate::domain::transcode::SymbolTable;

const VARIATION_SELECTOR_16: char = '\u{FE0F}';

static STANDARD_TABLE: Lazy<SymbolTable> = Lazy::new(build_standard_table);

/// Process-wide table covering every emoji, skin tone variant included
pub fn standard_table() -> &'static SymbolTable {
    &STANDARD_TABLE
}

fn build_standard_table() -> SymbolTable {
    let mut table = SymbolTable::new();

    for emoji in emojis::iter() {
        insert_with_variants(&mut table, emoji);
        if let Some(tones) = emoji.skin_tones() {
            for toned in tones {
                insert_with_variants(&mut table, toned);
            }
        }
    }

    tracing::debug!(entries = table.len(), "Built emoji symbol table");
    table
}

fn insert_with_variants(table: &mut SymbolTable, emoji: &emojis::Emoji) {
    let symbol = emoji.as_str();
    let name = short_name(emoji.name());
    table.insert(symbol, name.clone());

    // Text often carries the emoji without its presentation selector
    if symbol.contains(VARIATION_SELECTOR_16) {
        let bare: String = symbol.chars().filter(|&c| c != VARIATION_SELECTOR_16).collect();
        if !bare.is_ascii() {
            table.insert(bare, name);
        }
    }
}

/// "grinning face" -> "grinning_face", "flag: Japan" -> "Japan",
/// "keycap: 1" -> "keycap_1"
pub fn short_name(cldr_name: &str) -> String {
    let name = cldr_name.strip_prefix("flag: ").unwrap_or(cldr_name);
    name.chars()
        .filter(|c| !matches!(c, ':' | ',' | '“' | '”'))
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
