use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use anyhow::{Context, Error};
use serde::Serialize;
use structopt::StructOpt;

use shelf_planner::{Builder, Categorization, Goal, Recommendation, ShelfLayout};

use crate::{
    exit_code::{NON_FATAL_ERROR, NO_ERROR},
    input::{transactions, PlannerArgs},
};

/// Recommend a product category for each shelf of a store.
#[derive(StructOpt, Debug)]
pub struct RecommendCmd {
    #[structopt(flatten)]
    pub args: PlannerArgs,

    /// A JSON file with the shelves as a list of `{"name", "x", "y"}` objects.
    #[structopt(long)]
    pub shelves: PathBuf,

    /// Either `maximize` to cluster associated categories around the center of the store or
    /// `minimize` to spread them over alternating shelves.
    #[structopt(long, default_value = "maximize")]
    pub goal: Goal,
}

impl RecommendCmd {
    pub fn run(self) -> Result<i32, Error> {
        let result = self.recommend()?;
        self.args.print(&result)?;

        for failed in &result.categorization.failed {
            eprintln!("{}: {}", failed.id, failed.error);
        }
        if let Some(unassigned) = &result.recommendation.assignment.unassigned {
            eprintln!("{}", unassigned.message);
        }

        let exit_code = if result.categorization.failed.is_empty()
            && result.recommendation.analysis.message.is_none()
        {
            NO_ERROR
        } else {
            NON_FATAL_ERROR
        };

        Ok(exit_code)
    }

    fn recommend(&self) -> Result<RecommendCmdResult, Error> {
        let layout = load_layout(&self.shelves)?;
        let categorization = self.args.categorize()?;
        let transactions = transactions(&categorization)?;

        let mut planner = Builder::default().with_config(self.args.config()?).build();
        let recommendation = planner.recommend(&transactions, &layout, self.goal);
        for error in planner.errors() {
            eprintln!("{}", error);
        }

        Ok(RecommendCmdResult {
            categorization,
            recommendation,
        })
    }
}

fn load_layout(path: &Path) -> Result<ShelfLayout, Error> {
    let file = File::open(path)
        .with_context(|| format!("Opening the shelves {} failed", path.display()))?;

    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Parsing the shelves {} failed", path.display()))
}

#[derive(Serialize)]
struct RecommendCmdResult {
    categorization: Categorization,
    recommendation: Recommendation,
}
