//! Plain-text rendering of games.
//!
//! `TextRenderer` is an observer: plug it into a `Game` to get a turn log,
//! and a board summary when the game ends. `render_board` and
//! `render_summary` work on any state.

use std::cell::RefCell;
use std::fmt::Write as _;
use std::io::{self, Write};
use std::rc::Rc;

use crate::board::{ArmyId, GameState};
use crate::game::{Event, Observer};

/// One line per army: territories, units, regions held.
pub fn render_summary(state: &GameState) -> String {
    let world = state.world();
    let mut out = String::new();
    for army in world.army_ids() {
        let regions: Vec<&str> = state
            .regions_of(army)
            .iter()
            .filter_map(|&r| world.region(r))
            .map(|r| r.name.as_str())
            .collect();
        let _ = writeln!(
            out,
            "{:<8} {:>3} territories {:>4} units{}{}",
            army.to_string(),
            state.territory_count_of(army),
            state.army_units(army),
            if regions.is_empty() { "" } else { "  holds " },
            regions.join(", ")
        );
    }
    out
}

/// Every territory grouped by region, with its occupant and units.
pub fn render_board(state: &GameState) -> String {
    let world = state.world();
    let mut out = String::new();
    for (region_id, region) in world.region_ids().zip(world.regions()) {
        let _ = match state.region_occupant(region_id) {
            Some(army) => writeln!(out, "{} (+{}, held by {army})", region.name, region.bonus),
            None => writeln!(out, "{} (+{})", region.name, region.bonus),
        };
        for &t in &region.territories {
            let occupation = state.get(t);
            let (army, units) = occupation.map_or((String::from("?"), 0), |o| (o.army.to_string(), o.units));
            let _ = writeln!(out, "  {:<32} {:<8} {:>3}", world.territory_name(t), army, units);
        }
    }
    out
}

fn describe(event: &Event<'_>, state: &GameState) -> Option<String> {
    let name = |t| state.world().territory_name(t).to_string();
    let line = match *event {
        Event::TurnStarted { round, army } => format!("round {round}: {army} to play"),
        Event::Reinforced { army, plan } => {
            let parts: Vec<String> = plan.iter().map(|(t, u)| format!("{} +{u}", name(t))).collect();
            format!("  {army} reinforces {}", parts.join(", "))
        }
        Event::AttackRound { attack, report, .. } => format!(
            "  {} attacks {} from {} with {}: {} lost {}, {} lost {}",
            report.attacker,
            name(attack.to),
            name(attack.from),
            attack.units,
            report.attacker,
            report.outcome.attacker_losses,
            report.defender,
            report.outcome.defender_losses,
        ),
        Event::Invaded { conquest, units } => {
            format!("  {} takes {} with {units} units", conquest.attacker, name(conquest.to))
        }
        Event::Maneuvered { army, maneuver: Some(m) } => {
            format!("  {army} moves {} from {} to {}", m.units, name(m.from), name(m.to))
        }
        Event::Maneuvered { maneuver: None, .. } => return None,
        Event::Eliminated { army, by } => format!("  {army} eliminated by {by}"),
        Event::RoundEnded { .. } => return None,
        Event::GameOver { winner: Some(w), rounds } => format!("{w} wins after {rounds} rounds"),
        Event::GameOver { winner: None, rounds } => format!("no winner within {rounds} rounds"),
    };
    Some(line)
}

/// Writes a turn log to any writer.
pub struct TextRenderer<W: Write> {
    out: W,
    board_at_end: bool,
    error: Option<io::Error>,
}

impl<W: Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        TextRenderer {
            out,
            board_at_end: true,
            error: None,
        }
    }

    /// Skip the full board dump when the game ends.
    pub fn without_board(mut self) -> Self {
        self.board_at_end = false;
        self
    }

    /// First write error encountered, if any. Rendering stops after it.
    pub fn take_error(&mut self) -> Option<io::Error> {
        self.error.take()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write(&mut self, text: &str) {
        if self.error.is_some() {
            return;
        }
        if let Err(e) = self.out.write_all(text.as_bytes()) {
            self.error = Some(e);
        }
    }
}

impl<W: Write> Observer for TextRenderer<W> {
    fn observe(&mut self, event: &Event<'_>, state: &GameState) {
        if let Some(line) = describe(event, state) {
            self.write(&line);
            self.write("\n");
        }
        if let Event::GameOver { .. } = event {
            if self.board_at_end {
                self.write(&render_board(state));
            }
            self.write(&render_summary(state));
        }
    }
}

/// Wraps a renderer as a game observer while the caller keeps a handle on
/// it, so write errors can still be collected once the game is over.
pub fn shared_renderer<W: Write + 'static>(
    renderer: TextRenderer<W>,
) -> (Rc<RefCell<TextRenderer<W>>>, Box<dyn Observer>) {
    let handle = Rc::new(RefCell::new(renderer));
    let sink = Rc::clone(&handle);
    let observer = Box::new(move |event: &Event<'_>, state: &GameState| sink.borrow_mut().observe(event, state));
    (handle, observer)
}

/// Renders a standings list, best first.
pub fn render_standings(standings: &[ArmyId]) -> String {
    standings
        .iter()
        .enumerate()
        .map(|(i, army)| format!("{}. {army}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::board::{maps, TerritoryId, World};
    use crate::config::GameConfig;
    use crate::game::Game;
    use crate::rules::ReinforcementPlan;
    use crate::strategy::strategy_by_name;

    fn state() -> GameState {
        let world = Arc::new(World::from_spec(&maps::polytech(), 2).unwrap());
        let assignments: Vec<_> = world
            .territory_ids()
            .map(|t| (t, ArmyId((t.0 % 2) as u8), 2))
            .collect();
        GameState::from_assignments(world, &assignments).unwrap()
    }

    #[test]
    fn summary_lists_every_army() {
        let text = render_summary(&state());
        assert!(text.contains("blue"));
        assert!(text.contains("green"));
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn board_lists_every_territory() {
        let s = state();
        let text = render_board(&s);
        assert!(text.contains("Département S.R.T."));
        assert_eq!(text.lines().count(), 17 + 4);
    }

    #[test]
    fn renderer_writes_log_lines_and_final_board() {
        let s = state();
        let mut renderer = TextRenderer::new(Vec::new());
        let plan = ReinforcementPlan::single(TerritoryId(0), 3);
        renderer.observe(&Event::Reinforced { army: ArmyId(0), plan: &plan }, &s);
        renderer.observe(&Event::GameOver { winner: None, rounds: 4 }, &s);
        assert!(renderer.take_error().is_none());
        let text = String::from_utf8(renderer.into_inner()).unwrap();
        assert!(text.starts_with("  blue reinforces Service informatique +3\n"));
        assert!(text.contains("no winner within 4 rounds"));
        assert!(text.contains("Océan Atlantique"));
    }

    struct ClosedPipe;

    impl Write for ClosedPipe {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::from(io::ErrorKind::BrokenPipe))
        }
        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn write_errors_survive_the_game() {
        let (handle, observer) = shared_renderer(TextRenderer::new(ClosedPipe));
        let strategies = vec![strategy_by_name("neutral").unwrap(), strategy_by_name("neutral").unwrap()];
        let config = GameConfig {
            max_rounds: Some(1),
            seed: 5,
            ..GameConfig::default()
        };
        Game::new(state(), strategies, &config)
            .unwrap()
            .with_observer(observer)
            .run()
            .unwrap();
        let err = handle.borrow_mut().take_error().expect("write error kept");
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert!(handle.borrow_mut().take_error().is_none());
    }
}
