use crate::cli::output::current_preferences;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
}

/// Header text and width constraints for one column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TableColumn {
    pub header: String,
    pub min_width: usize,
    pub max_width: Option<usize>,
    pub alignment: Alignment,
}

impl TableColumn {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            min_width: 0,
            max_width: None,
            alignment: Alignment::Left,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            alignment: Alignment::Right,
            ..Self::left(header)
        }
    }

    pub fn max_width(mut self, width: usize) -> Self {
        self.max_width = Some(width);
        self
    }
}

/// Body rows followed by footer rows, the two separated by a rule.
pub struct Table {
    pub columns: Vec<TableColumn>,
    pub rows: Vec<Vec<String>>,
    pub footer: Vec<Vec<String>>,
    pub padding: usize,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
            footer: Vec::new(),
            padding: 1,
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    pub fn push_footer(&mut self, row: Vec<String>) {
        self.footer.push(row);
    }

    /// Content width per column: the widest of header and cells, clamped to
    /// the column limits.
    pub fn compute_widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                let widest_cell = self
                    .rows
                    .iter()
                    .chain(&self.footer)
                    .filter_map(|row| row.get(idx))
                    .map(|cell| visible_width(cell))
                    .max()
                    .unwrap_or(0);
                let width = visible_width(&column.header)
                    .max(column.min_width)
                    .max(widest_cell);
                column.max_width.map_or(width, |max| width.min(max))
            })
            .collect()
    }

    pub fn render_row(&self, row: &[String], widths: &[usize]) -> String {
        self.columns
            .iter()
            .zip(widths)
            .enumerate()
            .map(|(idx, (column, width))| {
                let text = row.get(idx).map(String::as_str).unwrap_or("");
                render_cell(text, *width, column.alignment, self.padding)
            })
            .collect::<Vec<_>>()
            .join(" ")
            .trim_end()
            .to_string()
    }

    pub fn render(&self) -> String {
        let widths = self.compute_widths();
        let rule = horizontal_rule(&widths, self.padding);
        let header: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();

        let mut lines = vec![self.render_row(&header, &widths), rule.clone()];
        lines.extend(self.rows.iter().map(|row| self.render_row(row, &widths)));
        if !self.footer.is_empty() {
            lines.push(rule);
            lines.extend(self.footer.iter().map(|row| self.render_row(row, &widths)));
        }
        lines.join("\n")
    }
}

/// Character count ignoring ANSI escape sequences.
fn visible_width(text: &str) -> usize {
    let mut width = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\u{1b}' && chars.peek() == Some(&'[') {
            chars.next();
            for code in chars.by_ref() {
                if ('\u{40}'..='\u{7e}').contains(&code) {
                    break;
                }
            }
            continue;
        }
        width += 1;
    }
    width
}

fn truncate_text(text: &str, width: usize) -> String {
    if visible_width(text) <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let ellipsis = if current_preferences().plain_mode {
        '~'
    } else {
        '…'
    };
    let mut fitted: String = text.chars().take(width - 1).collect();
    fitted.push(ellipsis);
    fitted
}

pub fn render_cell(text: &str, width: usize, alignment: Alignment, padding: usize) -> String {
    let fitted = truncate_text(text, width);
    let remaining = width.saturating_sub(visible_width(&fitted));
    let pad = " ".repeat(padding);
    match alignment {
        Alignment::Left => format!("{pad}{fitted}{}{pad}", " ".repeat(remaining)),
        Alignment::Right => format!("{pad}{}{fitted}{pad}", " ".repeat(remaining)),
    }
}

pub fn horizontal_rule(widths: &[usize], padding: usize) -> String {
    if widths.is_empty() {
        return String::new();
    }
    let total: usize =
        widths.iter().map(|w| w + padding * 2).sum::<usize>() + widths.len().saturating_sub(1);
    let ch = if current_preferences().plain_mode {
        '-'
    } else {
        '─'
    };
    ch.to_string().repeat(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ansi_sequences_do_not_count_towards_width() {
        assert_eq!(visible_width("\u{1b}[32mR10.00\u{1b}[0m"), 6);
        assert_eq!(visible_width("Groceries"), 9);
    }

    #[test]
    fn long_cells_are_truncated_to_max_width() {
        let mut table = Table::new(vec![TableColumn::left("NAME").max_width(6)]);
        table.push_row(vec!["Entertainment".into()]);
        assert_eq!(table.compute_widths(), vec![6]);
        let rendered = table.render();
        let last = rendered.lines().last().expect("row");
        assert_eq!(visible_width(last.trim()), 6);
    }

    #[test]
    fn right_alignment_pads_on_the_left() {
        assert_eq!(render_cell("5", 3, Alignment::Right, 0), "  5");
        assert_eq!(render_cell("5", 3, Alignment::Left, 1), " 5   ");
    }
}
