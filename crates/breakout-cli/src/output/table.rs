//! Table formatting utilities for CLI output.

use breakout::parser::{Token, TokenKind};
use comfy_table::{ContentArrangement, Table, presets};

/// Format a flat token list as a table.
pub fn format_token_table(tokens: &[Token]) -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_BORDERS_ONLY);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Kind", "Keyword", "Span", "Content"]);

    for token in tokens {
        let kind = match token.kind {
            TokenKind::Variable => "variable",
            TokenKind::Block => "block",
        };
        table.add_row(vec![
            kind.to_string(),
            token.keyword.clone(),
            format!("{}..{}", token.start, token.end),
            token.path().to_string(),
        ]);
    }

    table
}
