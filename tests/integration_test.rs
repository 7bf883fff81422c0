use async_trait::async_trait;
use jeopardy::catalog::{CatalogError, CatalogProvider, CatalogResult, CategoryDetail};
use jeopardy::protocol::{ClientMessage, ServerMessage};
use jeopardy::state::{AppState, BoardView, SessionStatus};
use jeopardy::types::{Category, CategoryId, Clue, GameConfig, RevealMode};
use jeopardy::ws::handlers::handle_message;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Canned clue API
struct StaticCatalog {
    categories: Vec<CategoryDetail>,
    /// Fail the next listing request once
    fail_next_listing: AtomicBool,
}

impl StaticCatalog {
    fn new(category_count: u64, clue_count: u64) -> Self {
        let categories = (1..=category_count)
            .map(|c| CategoryDetail {
                id: c,
                title: format!("Topic {}", c),
                clues_count: clue_count as u32,
                clues: (1..=clue_count)
                    .map(|n| Clue {
                        id: c * 1000 + n,
                        question: format!("Q{}.{}", c, n),
                        answer: format!("A{}.{}", c, n),
                        value: if n == 1 { None } else { Some(n as u32 * 100) },
                    })
                    .collect(),
            })
            .collect();
        Self {
            categories,
            fail_next_listing: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn list_categories(&self, max_count: usize) -> CatalogResult<Vec<Category>> {
        if self.fail_next_listing.swap(false, Ordering::SeqCst) {
            return Err(CatalogError::Transport("connection refused".to_string()));
        }
        Ok(self
            .categories
            .iter()
            .take(max_count)
            .map(|c| Category {
                id: c.id,
                title: c.title.clone(),
                clues_count: c.clues_count,
            })
            .collect())
    }

    async fn get_category(&self, id: CategoryId) -> CatalogResult<CategoryDetail> {
        self.categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(CatalogError::Status(404))
    }
}

fn expect_board(msg: ServerMessage) -> BoardView {
    match msg {
        ServerMessage::Board { board } => board,
        other => panic!("Expected Board message, got {:?}", other),
    }
}

fn expect_error(msg: ServerMessage) -> String {
    match msg {
        ServerMessage::Error { code, .. } => code,
        other => panic!("Expected Error message, got {:?}", other),
    }
}

/// End-to-end: deal, play every clue, reach game over, restart
#[tokio::test]
async fn test_full_game_flow() {
    let catalog = Arc::new(StaticCatalog::new(12, 7));
    let state = Arc::new(AppState::new(
        catalog,
        GameConfig {
            category_count: 6,
            clues_per_category: 5,
            category_pool_size: 100,
        },
    ));

    // 1. Nothing dealt yet
    let board = expect_board(handle_message(ClientMessage::Sync, &state).await);
    assert_eq!(board.session, SessionStatus::Empty);
    assert!(board.play_enabled);

    // 2. Deal
    let board = expect_board(handle_message(ClientMessage::StartGame, &state).await);
    assert_eq!(board.session, SessionStatus::Ready);
    assert_eq!(board.categories.len(), 6);
    let mut ids: Vec<CategoryId> = board.categories.iter().map(|c| c.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 6, "Categories must be distinct");
    for category in &board.categories {
        assert_eq!(category.clues.len(), 5);
        // First clue has no value upstream
        assert_eq!(category.clues[0].value, 1000);
        assert_eq!(category.clues[1].value, 200);
    }

    // 3. Advance with nothing selected is rejected
    let code = expect_error(handle_message(ClientMessage::Advance, &state).await);
    assert_eq!(code, "INVALID_TRANSITION");

    // 4. Play every clue
    let plays: Vec<(CategoryId, u64)> = board
        .categories
        .iter()
        .flat_map(|c| c.clues.iter().map(move |clue| (c.id, clue.id)))
        .collect();
    let total = plays.len();

    for (i, (category_id, clue_id)) in plays.iter().copied().enumerate() {
        let shown = expect_board(
            handle_message(
                ClientMessage::SelectClue {
                    category_id,
                    clue_id,
                },
                &state,
            )
            .await,
        );
        assert_eq!(shown.mode, Some(RevealMode::ShowingQuestion));
        let active = shown.active.expect("Question should be shown");
        assert!(active.text.starts_with('Q'));

        // Second selection while a question is up is refused
        if i + 1 < total {
            let (next_category, next_clue) = plays[i + 1];
            let code = expect_error(
                handle_message(
                    ClientMessage::SelectClue {
                        category_id: next_category,
                        clue_id: next_clue,
                    },
                    &state,
                )
                .await,
            );
            assert_eq!(code, "INVALID_TRANSITION");
        }

        let answer = expect_board(handle_message(ClientMessage::Advance, &state).await);
        assert_eq!(answer.mode, Some(RevealMode::ShowingAnswer));
        assert!(answer.active.expect("Answer should be shown").text.starts_with('A'));

        let after = expect_board(handle_message(ClientMessage::Advance, &state).await);
        if i + 1 < total {
            assert_eq!(after.mode, Some(RevealMode::Idle));
            assert!(!after.game_over);
            assert!(!after.play_enabled);
        } else {
            assert_eq!(after.mode, Some(RevealMode::GameOver));
            assert!(after.game_over);
            assert!(after.play_enabled);
            assert_eq!(after.categories_completed, 6);
        }
    }

    // 5. Replaying a viewed clue after game over is rejected
    let (category_id, clue_id) = plays[0];
    let code = expect_error(
        handle_message(
            ClientMessage::SelectClue {
                category_id,
                clue_id,
            },
            &state,
        )
        .await,
    );
    assert_eq!(code, "INVALID_TRANSITION");

    // 6. Restart deals a fresh board
    let fresh = expect_board(handle_message(ClientMessage::StartGame, &state).await);
    assert_eq!(fresh.mode, Some(RevealMode::Idle));
    assert_eq!(fresh.categories_completed, 0);
    assert!(fresh
        .categories
        .iter()
        .all(|c| c.clues.iter().all(|clue| !clue.viewed)));
}

#[tokio::test]
async fn test_two_category_walkthrough() {
    let state = Arc::new(AppState::new(
        Arc::new(StaticCatalog::new(2, 1)),
        GameConfig {
            category_count: 2,
            clues_per_category: 1,
            category_pool_size: 100,
        },
    ));

    let board = expect_board(handle_message(ClientMessage::StartGame, &state).await);
    let a = &board.categories[0];
    let b = &board.categories[1];

    let view = state.select_clue(a.id, a.clues[0].id).await.unwrap();
    assert_eq!(view.mode, Some(RevealMode::ShowingQuestion));
    state.advance().await.unwrap();
    let view = state.advance().await.unwrap();
    assert_eq!(view.categories_completed, 1);
    assert_eq!(view.mode, Some(RevealMode::Idle));

    state.select_clue(b.id, b.clues[0].id).await.unwrap();
    state.advance().await.unwrap();
    let view = state.advance().await.unwrap();
    assert_eq!(view.categories_completed, 2);
    assert_eq!(view.mode, Some(RevealMode::GameOver));
}

#[tokio::test]
async fn test_insufficient_pool_and_recovery() {
    let catalog = Arc::new(StaticCatalog::new(4, 3));
    let state = Arc::new(AppState::new(
        catalog,
        GameConfig {
            category_count: 6,
            clues_per_category: 5,
            category_pool_size: 100,
        },
    ));

    let code = expect_error(handle_message(ClientMessage::StartGame, &state).await);
    assert_eq!(code, "SETUP_FAILED");

    let board = state.board_view().await;
    assert!(matches!(board.session, SessionStatus::Failed { .. }));
    assert!(board.play_enabled);
    assert!(board.categories.is_empty());

    let code = expect_error(
        handle_message(
            ClientMessage::SelectClue {
                category_id: 1,
                clue_id: 1001,
            },
            &state,
        )
        .await,
    );
    assert_eq!(code, "NO_GAME");
}

#[tokio::test]
async fn test_transport_failure_then_retry() {
    let catalog = Arc::new(StaticCatalog::new(8, 5));
    catalog.fail_next_listing.store(true, Ordering::SeqCst);
    let state = Arc::new(AppState::new(catalog, GameConfig::default()));

    let code = expect_error(handle_message(ClientMessage::StartGame, &state).await);
    assert_eq!(code, "SETUP_FAILED");

    let board = expect_board(handle_message(ClientMessage::StartGame, &state).await);
    assert_eq!(board.session, SessionStatus::Ready);
    assert_eq!(board.categories.len(), 6);
}

#[tokio::test]
async fn test_board_serializes_for_clients() {
    let state = Arc::new(AppState::new(
        Arc::new(StaticCatalog::new(6, 5)),
        GameConfig::default(),
    ));
    let board = expect_board(handle_message(ClientMessage::StartGame, &state).await);

    let json = serde_json::to_value(ServerMessage::Board { board }).unwrap();
    assert_eq!(json["t"], "board");
    assert_eq!(json["board"]["mode"], "IDLE");
    assert_eq!(json["board"]["session"]["kind"], "ready");
    assert_eq!(json["board"]["categories"].as_array().unwrap().len(), 6);

    let titles: HashMap<u64, String> = serde_json::from_value::<BoardView>(json["board"].clone())
        .unwrap()
        .categories
        .into_iter()
        .map(|c| (c.id, c.title))
        .collect();
    for (id, title) in titles {
        assert_eq!(title, format!("Topic {}", id));
    }
}
