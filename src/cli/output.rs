//! Output formatting utilities for CLI.

// Averages over game counts
#![allow(clippy::cast_precision_loss)]

use std::fmt::Write;

use frontier::PlanReport;
use frontier::arena::GameResult;
use serde::Serialize;

/// Format a game result as human-readable text.
pub(super) fn format_text(result: &GameResult) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Game Result (seed: {})", result.seed);
    match result.winner {
        Some(winner) => {
            let _ = writeln!(output, "  Winner: Player {winner}");
        }
        None => output.push_str("  Winner: none\n"),
    }
    let _ = writeln!(output, "  Turns: {}\n", result.turns_played);

    for player in &result.players {
        let _ = write!(
            output,
            "  Player {}: {} cells, {} production, {} strength",
            player.owner, player.score.territory, player.score.production, player.score.strength
        );
        if let Some(turn) = player.eliminated_turn {
            let _ = write!(output, " [eliminated turn {turn}]");
        }
        if let Some(target) = player.plan.best_target {
            let _ = write!(output, " (target {},{})", target.x, target.y);
        }
        output.push('\n');
    }

    output
}

/// Format a campaign report as human-readable text.
pub(super) fn format_plan(report: &PlanReport) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Campaign Plan (player {})", report.owner);
    let _ = writeln!(output, "  Start: {},{}", report.start.x, report.start.y);
    match report.nearest_enemy {
        Some(enemy) => {
            let _ = writeln!(output, "  Nearest enemy: {},{}", enemy.x, enemy.y);
        }
        None => output.push_str("  Nearest enemy: none\n"),
    }
    let _ = writeln!(output, "  Horizon: {} turns", report.horizon);
    let _ = writeln!(
        output,
        "  Baseline: {} production, {} cells",
        report.baseline.production, report.baseline.territory
    );
    match report.best_target {
        Some(target) => {
            let _ = writeln!(
                output,
                "  Target: {},{} ({} production, corridor of {} cells)",
                target.x, target.y, report.best_score.production, report.corridor_len
            );
        }
        None => output.push_str("  Target: none (baseline not beaten)\n"),
    }
    let _ = writeln!(
        output,
        "  Frontier: {} cells, {} evaluated, {} pruned, {} unreachable",
        report.frontier_size, report.evaluated, report.pruned, report.unreachable
    );
    let _ = writeln!(
        output,
        "  Search: {} ms{}",
        report.elapsed_ms,
        if report.budget_exhausted {
            " (budget exhausted)"
        } else {
            ""
        }
    );

    output
}

/// Tournament statistics for aggregated results.
#[derive(Debug, Default)]
pub(super) struct TournamentStats {
    /// Total games played.
    pub(super) games_played: u64,
    /// Games that failed to run.
    pub(super) failures: u64,
    /// Win count per player.
    pub(super) wins: Vec<u64>,
    /// Games without a surviving player.
    pub(super) draws: u64,
    /// Total final territory per player.
    total_territory: Vec<f64>,
    /// Territory sum of squares for std dev calculation.
    territory_sq_sums: Vec<f64>,
    /// Total final production per player.
    total_production: Vec<f64>,
    /// Total turns across all games.
    total_turns: u64,
}

impl TournamentStats {
    /// Create new stats for n players.
    pub(super) fn new(num_players: usize) -> Self {
        Self {
            games_played: 0,
            failures: 0,
            wins: vec![0; num_players],
            draws: 0,
            total_territory: vec![0.0; num_players],
            territory_sq_sums: vec![0.0; num_players],
            total_production: vec![0.0; num_players],
            total_turns: 0,
        }
    }

    /// Add a game result to the stats.
    pub(super) fn add_result(&mut self, result: &GameResult) {
        self.games_played += 1;
        self.total_turns += u64::from(result.turns_played);

        if let Some(winner) = result.winner {
            let idx = usize::from(winner) - 1;
            if idx < self.wins.len() {
                self.wins[idx] += 1;
            }
        } else {
            self.draws += 1;
        }

        for (i, player) in result.players.iter().enumerate() {
            if i < self.total_territory.len() {
                let territory = f64::from(player.score.territory);
                self.total_territory[i] += territory;
                self.territory_sq_sums[i] += territory * territory;
                self.total_production[i] += f64::from(player.score.production);
            }
        }
    }

    /// Merge stats gathered on another thread.
    pub(super) fn merge(&mut self, other: &Self) {
        self.games_played += other.games_played;
        self.failures += other.failures;
        self.draws += other.draws;
        self.total_turns += other.total_turns;
        for (a, b) in self.wins.iter_mut().zip(&other.wins) {
            *a += b;
        }
        for (a, b) in self.total_territory.iter_mut().zip(&other.total_territory) {
            *a += b;
        }
        for (a, b) in self.territory_sq_sums.iter_mut().zip(&other.territory_sq_sums) {
            *a += b;
        }
        for (a, b) in self.total_production.iter_mut().zip(&other.total_production) {
            *a += b;
        }
    }

    /// Get win rate for a player (0.0-1.0).
    pub(super) fn win_rate(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.wins.get(player_idx).copied().unwrap_or(0) as f64 / self.games_played as f64
    }

    /// Get average final territory for a player.
    pub(super) fn avg_territory(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_territory.get(player_idx).copied().unwrap_or(0.0) / self.games_played as f64
    }

    /// Get final territory standard deviation for a player.
    pub(super) fn territory_std_dev(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        let n = self.games_played as f64;
        let mean = self.avg_territory(player_idx);
        let sq_sum = self.territory_sq_sums.get(player_idx).copied().unwrap_or(0.0);
        let variance = (sq_sum / n) - (mean * mean);
        if variance < 0.0 { 0.0 } else { variance.sqrt() }
    }

    /// Get average final production for a player.
    pub(super) fn avg_production(&self, player_idx: usize) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_production.get(player_idx).copied().unwrap_or(0.0) / self.games_played as f64
    }

    /// Get average game length.
    pub(super) fn avg_turns(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.total_turns as f64 / self.games_played as f64
    }
}

/// JSON-serializable tournament result.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentResult {
    /// Total games played.
    games_played: u64,
    /// Games that failed to run.
    failures: u64,
    /// Per-player statistics.
    players: Vec<JsonTournamentPlayer>,
    /// Number of games without a survivor.
    draws: u64,
    /// Average game length in turns.
    avg_turns: f64,
}

/// JSON-serializable per-player tournament stats.
#[derive(Debug, Serialize)]
pub(super) struct JsonTournamentPlayer {
    /// Player id (1-based).
    player: usize,
    /// Number of wins.
    wins: u64,
    /// Win rate (0.0-1.0).
    win_rate: f64,
    /// Average final territory.
    avg_territory: f64,
    /// Final territory standard deviation.
    territory_std_dev: f64,
    /// Average final production.
    avg_production: f64,
}

impl JsonTournamentResult {
    /// Create from stats.
    pub(super) fn from_stats(stats: &TournamentStats) -> Self {
        let players = (0..stats.wins.len())
            .map(|i| JsonTournamentPlayer {
                player: i + 1,
                wins: stats.wins[i],
                win_rate: stats.win_rate(i),
                avg_territory: stats.avg_territory(i),
                territory_std_dev: stats.territory_std_dev(i),
                avg_production: stats.avg_production(i),
            })
            .collect();

        Self {
            games_played: stats.games_played,
            failures: stats.failures,
            players,
            draws: stats.draws,
            avg_turns: stats.avg_turns(),
        }
    }
}

/// Format tournament stats as human-readable text.
pub(super) fn format_tournament_text(stats: &TournamentStats) -> String {
    let mut output = String::new();

    let _ = writeln!(output, "Tournament Results ({} games)", stats.games_played);
    output.push_str("========================================\n\n");

    output.push_str("Win Rates:\n");
    for (i, wins) in stats.wins.iter().enumerate() {
        let rate = stats.win_rate(i) * 100.0;
        let _ = writeln!(output, "  Player {}: {rate:.1}% ({wins} wins)", i + 1);
    }
    let draw_rate = if stats.games_played == 0 {
        0.0
    } else {
        (stats.draws as f64 / stats.games_played as f64) * 100.0
    };
    let _ = writeln!(output, "  Draws: {} ({draw_rate:.1}%)\n", stats.draws);

    output.push_str("Final Territory:\n");
    for i in 0..stats.wins.len() {
        let _ = writeln!(
            output,
            "  Player {}: {:.1} (+/- {:.1}), production {:.1}",
            i + 1,
            stats.avg_territory(i),
            stats.territory_std_dev(i),
            stats.avg_production(i)
        );
    }

    let _ = writeln!(output, "\nAverage Game Length: {:.0} turns", stats.avg_turns());
    if stats.failures > 0 {
        let _ = writeln!(output, "Failed games: {}", stats.failures);
    }

    output
}

/// Format tournament stats as CSV.
pub(super) fn format_tournament_csv(stats: &TournamentStats) -> String {
    let mut output = String::new();

    // Header
    output.push_str("player,wins,win_rate,avg_territory,territory_std_dev,avg_production\n");

    // Data rows
    for i in 0..stats.wins.len() {
        let _ = writeln!(
            output,
            "{},{},{:.4},{:.2},{:.2},{:.2}",
            i + 1,
            stats.wins[i],
            stats.win_rate(i),
            stats.avg_territory(i),
            stats.territory_std_dev(i),
            stats.avg_production(i)
        );
    }

    output
}
