use anyhow::Error;
use serde::Serialize;
use structopt::StructOpt;

use shelf_planner::{
    category_relations,
    AnalysisSummary,
    Builder,
    Categorization,
    CategoryRelations,
    CategoryScores,
    Rule,
};

use crate::{
    exit_code::{NON_FATAL_ERROR, NO_ERROR},
    input::{transactions, PlannerArgs},
};

/// Mine the association rules between the categories of the receipts.
#[derive(StructOpt, Debug)]
pub struct AnalyzeCmd {
    #[structopt(flatten)]
    pub args: PlannerArgs,
}

impl AnalyzeCmd {
    pub fn run(self) -> Result<i32, Error> {
        let result = self.analyze()?;
        self.args.print(&result)?;

        for failed in &result.categorization.failed {
            eprintln!("{}: {}", failed.id, failed.error);
        }
        if let Some(message) = &result.summary.message {
            eprintln!("{}", message);
        }

        let exit_code = if result.categorization.failed.is_empty() && result.summary.message.is_none()
        {
            NO_ERROR
        } else {
            NON_FATAL_ERROR
        };

        Ok(exit_code)
    }

    fn analyze(&self) -> Result<AnalyzeCmdResult, Error> {
        let categorization = self.args.categorize()?;
        let transactions = transactions(&categorization)?;

        let mut planner = Builder::default().with_config(self.args.config()?).build();
        let result = match planner.analyze(&transactions) {
            Ok(analysis) => AnalyzeCmdResult {
                summary: (&analysis).into(),
                category_scores: Some(CategoryScores::from_rules(&analysis.rules)),
                category_relations: Some(category_relations(&analysis.rules)),
                rules: analysis.rules,
                categorization,
            },
            Err(error) => AnalyzeCmdResult {
                summary: (&error).into(),
                rules: Vec::new(),
                category_scores: None,
                category_relations: None,
                categorization,
            },
        };
        for error in planner.errors() {
            eprintln!("{}", error);
        }

        Ok(result)
    }
}

#[derive(Serialize)]
struct AnalyzeCmdResult {
    categorization: Categorization,
    summary: AnalysisSummary,
    rules: Vec<Rule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_scores: Option<CategoryScores>,
    #[serde(skip_serializing_if = "Option::is_none")]
    category_relations: Option<CategoryRelations>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_cmd(extra: &[&str]) -> AnalyzeCmd {
        let receipts = test_utils::store::receipts().unwrap();
        let catalog = test_utils::store::catalog().unwrap();
        let mut args = vec![
            "analyze".to_string(),
            receipts.display().to_string(),
            "--catalog".to_string(),
            catalog.display().to_string(),
        ];
        args.extend(extra.iter().map(ToString::to_string));

        AnalyzeCmd::from_iter(args)
    }

    #[test]
    fn test_analyze_sample_store() {
        let result = sample_cmd(&[]).analyze().unwrap();

        assert!(result.categorization.failed.is_empty());
        assert!(result.summary.message.is_none());
        assert!(!result.rules.is_empty());
        assert!(result.rules.iter().all(Rule::is_positive));
        assert_eq!(result.summary.total_rules, result.rules.len());
        assert!(result.summary.top_rules.len() <= 10);
        assert!(result.category_scores.is_some());
    }

    #[test]
    fn test_analyze_top_rules() {
        let result = sample_cmd(&["--top-rules", "1"]).analyze().unwrap();

        assert_eq!(result.summary.top_rules.len(), 1);
        assert_eq!(result.summary.top_rules[0], result.rules[0]);
    }

    #[test]
    fn test_analyze_serializes() {
        let result = sample_cmd(&[]).analyze().unwrap();

        let json = serde_json::to_value(&result).unwrap();

        assert!(json["rules"].is_array());
        assert!(json["summary"].get("message").is_none());
    }
}
