use crate::context::ExecutionContext;
use crate::views::{self, RuleListView, RuleRow, Style};
use anyhow::Result;
use gitid_engine::specificity;

pub fn list(ctx: &ExecutionContext) -> Result<()> {
    let config = ctx.config()?;

    let rows: Vec<RuleRow> = config
        .rules
        .iter()
        .enumerate()
        .map(|(index, rule)| RuleRow {
            index,
            rule_type: rule.rule_type,
            pattern: rule.pattern.clone(),
            identity: rule.identity.clone(),
            email: config.identity(&rule.identity).map(|i| i.email.clone()),
            score: specificity(rule),
        })
        .collect();

    views::render(ctx.format, &rows, RuleListView::new(&rows, Style::detect()))
}
