//! Base running.
//!
//! All helpers keep runners ordered lead runner first. A runner pushed to
//! base 4 has scored; [`take_scored`] removes and counts them.

use crate::game::Runner;
use crate::rng::Rng;

/// Chance that an unblocked runner takes an extra base on a ground out.
pub(crate) const GROUND_OUT_ADVANCE: f64 = 0.1;

/// Every runner moves up `bases`, then the batter joins at `bases`.
pub(crate) fn hit(runners: &mut Vec<Runner>, batter: &str, bases: u8) {
    for runner in runners.iter_mut() {
        runner.base += bases;
    }
    runners.push(Runner::new(batter, bases));
}

/// Put the batter on first and force runners ahead only where needed.
///
/// Walks from the trailing runner toward the lead; a runner standing on or
/// behind the base of the runner behind them is pushed one base past it.
pub(crate) fn walk(runners: &mut Vec<Runner>, batter: &str) {
    runners.push(Runner::new(batter, 1));
    let mut behind: Option<u8> = None;
    for runner in runners.iter_mut().rev() {
        if let Some(base) = behind.filter(|base| runner.base <= *base) {
            runner.base = base + 1;
        }
        behind = Some(runner.base);
    }
}

/// Each runner may take one extra base with probability `threshold`.
///
/// Evaluated from the lead runner backward. A runner whose next base is
/// occupied does not attempt and consumes no draw, so nobody passes the
/// runner ahead.
pub(crate) fn maybe_advance(rng: &mut Rng, runners: &mut [Runner], threshold: f64) {
    let mut ahead: Option<u8> = None;
    for runner in runners.iter_mut() {
        let open = ahead.is_none_or(|base| base > runner.base + 1);
        if open && rng.chance(threshold) {
            runner.base += 1;
        }
        ahead = Some(runner.base);
    }
}

/// Remove every runner that reached home and return how many did.
pub(crate) fn take_scored(runners: &mut Vec<Runner>) -> u32 {
    let before = runners.len();
    runners.retain(|runner| runner.base < 4);
    u32::try_from(before - runners.len()).unwrap_or(u32::MAX)
}

/// Human-readable name for a base number.
#[must_use]
pub fn base_name(base: u8) -> &'static str {
    match base {
        1 => "first",
        2 => "second",
        3 => "third",
        4 => "fourth",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bases(runners: &[Runner]) -> Vec<u8> {
        runners.iter().map(|r| r.base).collect()
    }

    fn on(bases: &[u8]) -> Vec<Runner> {
        bases
            .iter()
            .enumerate()
            .map(|(i, b)| Runner::new(format!("r{i}"), *b))
            .collect()
    }

    #[test]
    fn test_walk_with_bases_empty() {
        let mut runners = Vec::new();
        walk(&mut runners, "batter");
        assert_eq!(bases(&runners), vec![1]);
    }

    #[test]
    fn test_walk_forces_only_occupied_chain() {
        let mut runners = on(&[3, 1]);
        walk(&mut runners, "batter");
        // Runner on first is forced to second; runner on third is not forced.
        assert_eq!(bases(&runners), vec![3, 2, 1]);
    }

    #[test]
    fn test_walk_with_bases_loaded_scores_lead() {
        let mut runners = on(&[3, 2, 1]);
        walk(&mut runners, "batter");
        assert_eq!(bases(&runners), vec![4, 3, 2, 1]);
        assert_eq!(take_scored(&mut runners), 1);
        assert_eq!(bases(&runners), vec![3, 2, 1]);
    }

    #[test]
    fn test_walk_leaves_runner_on_second_alone() {
        let mut runners = on(&[2]);
        walk(&mut runners, "batter");
        assert_eq!(bases(&runners), vec![2, 1]);
    }

    #[test]
    fn test_hit_moves_everyone() {
        let mut runners = on(&[2, 1]);
        hit(&mut runners, "batter", 2);
        assert_eq!(bases(&runners), vec![4, 3, 2]);
        assert_eq!(runners[2].name, "batter");
    }

    #[test]
    fn test_maybe_advance_always() {
        let mut rng = Rng::new(3, 5);
        let mut runners = on(&[2, 1]);
        maybe_advance(&mut rng, &mut runners, 1.0);
        assert_eq!(bases(&runners), vec![3, 2]);
    }

    #[test]
    fn test_maybe_advance_blocked_runner_draws_nothing() {
        let mut rng = Rng::new(3, 5);
        let mut reference = rng;
        // Lead fails to advance, so the trailing runner is blocked and skips its draw.
        let mut runners = on(&[3, 2]);
        maybe_advance(&mut rng, &mut runners, 0.0);
        assert_eq!(bases(&runners), vec![3, 2]);
        reference.next_f64();
        assert_eq!(rng, reference);
    }

    #[test]
    fn test_base_names() {
        assert_eq!(base_name(2), "second");
        assert_eq!(base_name(9), "");
    }
}
