use crate::infra::InMemoryUserDirectory;
use campus_nest::config::AppConfig;
use campus_nest::error::AppError;
use campus_nest::roommates::{
    AuthenticatedPrincipal, RoommateMatch, RoommateMatchService, RosterImporter, ScoringConfig,
    UserId,
};
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct MatchReportArgs {
    /// CSV roster export with one user per row
    #[arg(long)]
    pub(crate) roster: PathBuf,
    /// Id of the user to find roommates for
    #[arg(long)]
    pub(crate) user: String,
    /// Only print the top N candidates
    #[arg(long)]
    pub(crate) limit: Option<usize>,
    /// Print the per-pool points behind each score
    #[arg(long)]
    pub(crate) breakdown: bool,
}

pub(crate) fn run_match_report(args: MatchReportArgs) -> Result<(), AppError> {
    let MatchReportArgs {
        roster,
        user,
        limit,
        breakdown,
    } = args;

    let app_config = AppConfig::load()?;
    let import = RosterImporter::from_path(&roster)?;
    println!("Roommate matches for {}", user);
    println!(
        "Roster: {} ({} users imported, {} rows skipped)",
        roster.display(),
        import.users.len(),
        import.skipped.len()
    );
    for skipped in &import.skipped {
        println!(
            "  Skipped row {} ({}): {}",
            skipped.row, skipped.user_id, skipped.reason
        );
    }

    let directory = Arc::new(InMemoryUserDirectory::seeded(import));
    let config = ScoringConfig::default().with_budget_scale(app_config.matching.budget_scale);
    let service = RoommateMatchService::new(directory, config);
    let principal = AuthenticatedPrincipal::new(UserId::new(user));

    let matches = service.find_matches(&principal)?;
    let shown = limit.unwrap_or(matches.len()).min(matches.len());
    render_matches(&matches[..shown], matches.len());

    if breakdown {
        println!("\nScore breakdown");
        for entry in &matches[..shown] {
            let detail = service.breakdown(&principal, &entry.user.id)?;
            println!("  {} ({})", entry.user.name, detail.total);
            for component in &detail.components {
                println!(
                    "    {:<16} {:>3}  {}",
                    component.pool.label(),
                    component.points,
                    component.notes
                );
            }
        }
    }

    Ok(())
}

fn render_matches(matches: &[RoommateMatch], total: usize) {
    if matches.is_empty() {
        println!("\nNo opted-in candidates found");
        return;
    }

    println!("\nRanking (showing {} of {})", matches.len(), total);
    for (position, entry) in matches.iter().enumerate() {
        println!(
            "  {:>2}. {:<24} {:>3}/100  {}",
            position + 1,
            entry.user.name,
            entry.compatibility_score,
            entry.user.university.as_deref().unwrap_or("university not set")
        );
        for reason in &entry.match_reasons {
            println!("      - {}", reason);
        }
    }
}
