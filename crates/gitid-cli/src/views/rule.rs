use super::Style;
use gitid_types::RuleType;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Serialize)]
pub struct RuleRow {
    pub index: usize,
    #[serde(rename = "type")]
    pub rule_type: RuleType,
    pub pattern: String,
    pub identity: String,
    /// `None` when the identity is not defined
    pub email: Option<String>,
    pub score: i32,
}

pub struct RuleListView<'a> {
    rows: &'a [RuleRow],
    style: Style,
}

impl<'a> RuleListView<'a> {
    pub fn new(rows: &'a [RuleRow], style: Style) -> Self {
        Self { rows, style }
    }
}

impl<'a> fmt::Display for RuleListView<'a> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.rows.is_empty() {
            writeln!(f, "No rules configured.")?;
            return Ok(());
        }

        writeln!(
            f,
            "{:<3} {:<10} {:<40} {:>5}  IDENTITY",
            "#", "TYPE", "PATTERN", "SCORE"
        )?;
        writeln!(f, "{}", "-".repeat(80))?;

        for row in self.rows {
            let identity = match &row.email {
                Some(email) => format!("{} <{}>", row.identity, email),
                None => format!("{} {}", row.identity, self.style.bad("(undefined)")),
            };
            writeln!(
                f,
                "{:<3} {:<10} {:<40} {:>5}  {}",
                row.index + 1,
                row.rule_type,
                row.pattern,
                row.score,
                identity
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_list() {
        let rows = vec![
            RuleRow {
                index: 0,
                rule_type: RuleType::Remote,
                pattern: "github.com/acme".to_string(),
                identity: "work".to_string(),
                email: Some("alice@work.com".to_string()),
                score: 70,
            },
            RuleRow {
                index: 1,
                rule_type: RuleType::Directory,
                pattern: "~/oss/**".to_string(),
                identity: "oss".to_string(),
                email: None,
                score: 13,
            },
        ];

        let rendered = RuleListView::new(&rows, Style::plain()).to_string();
        insta::assert_snapshot!(rendered, @r"
        #   TYPE       PATTERN                                  SCORE  IDENTITY
        --------------------------------------------------------------------------------
        1   remote     github.com/acme                             70  work <alice@work.com>
        2   directory  ~/oss/**                                    13  oss (undefined)
        ");
    }
}
