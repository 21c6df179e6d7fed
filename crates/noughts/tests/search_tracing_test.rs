//! Span volume of the minimax search under the TUI's default filter.

use std::sync::{Arc, Mutex};

use noughts::solve::solve;
use noughts_core::{AiPlayer, GameState, Player};
use tracing::Subscriber;
use tracing::span::{Attributes, Id};
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::{EnvFilter, Layer};

/// Records the name of every span opened.
#[derive(Clone, Default)]
struct SpanNames(Arc<Mutex<Vec<&'static str>>>);

impl SpanNames {
    fn count(&self, name: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|n| **n == name).count()
    }

    fn total(&self) -> usize {
        self.0.lock().unwrap().len()
    }
}

impl<S: Subscriber> Layer<S> for SpanNames {
    fn on_new_span(&self, attrs: &Attributes<'_>, _id: &Id, _ctx: Context<'_, S>) {
        self.0.lock().unwrap().push(attrs.metadata().name());
    }
}

fn with_info_subscriber(f: impl FnOnce()) -> SpanNames {
    let names = SpanNames::default();
    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new("info"))
        .with(names.clone());
    tracing::subscriber::with_default(subscriber, f);
    names
}

#[test]
fn test_search_opens_no_span_per_node() {
    let game = GameState::new().apply_move(0, 1, Player::X).unwrap();

    let names = with_info_subscriber(|| {
        AiPlayer::new().choose_move(game.board()).unwrap();
    });

    // The search visits tens of thousands of nodes; only the entry points trace.
    assert_eq!(names.count("check_winner"), 0);
    assert_eq!(names.count("choose_move"), 1);
    assert!(names.total() < 10, "{} spans opened", names.total());
}

#[test]
fn test_solve_searches_once() {
    let names = with_info_subscriber(|| {
        solve("X../.../...").unwrap();
    });

    assert_eq!(names.count("score_moves"), 1);
    assert_eq!(names.count("choose_move"), 0);
}
