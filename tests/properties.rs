// Property tests for store invariants over arbitrary transition sequences.

use proptest::prelude::*;

use smeshariki_adventure::store::music::MUSIC_CHARACTERS;
use smeshariki_adventure::{
    Action, CharacterId, GameState, GameStore, MazePosition, STAGE_ORDER, Stage,
};

fn character() -> impl Strategy<Value = CharacterId> {
    prop::sample::select(CharacterId::ALL.to_vec())
}

fn stage() -> impl Strategy<Value = Stage> {
    prop::sample::select(STAGE_ORDER.to_vec())
}

fn action() -> impl Strategy<Value = Action> {
    let progression = prop_oneof![
        Just(Action::AdvanceStage),
        stage().prop_map(Action::SetStage),
        character().prop_map(Action::SelectCharacter),
        (-500i32..500).prop_map(Action::AddScore),
        (0u32..20).prop_map(Action::AddReward),
        Just(Action::LoseLife),
        Just(Action::TogglePause),
        Just(Action::ResetGame),
        Just(Action::AutoReturnToMain),
    ];
    let minigames = prop_oneof![
        Just(Action::InitMemoryGame),
        (0u32..16).prop_map(Action::FlipCard),
        Just(Action::ResetFlippedCards),
        prop::collection::vec(prop::sample::select(MUSIC_CHARACTERS.to_vec()), 0..8)
            .prop_map(Action::SetMusicSequence),
        character().prop_map(Action::AddPlayerNote),
        Just(Action::ResetPlayerSequence),
        (-3i32..12, -3i32..12).prop_map(|(x, y)| Action::SetMazePosition(MazePosition::new(x, y))),
        (0u32..10_000).prop_map(Action::UpdateGameTime),
    ];
    prop_oneof![progression, minigames]
}

fn action_seq(max: usize) -> impl Strategy<Value = Vec<Action>> {
    prop::collection::vec(action(), 0..max)
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn check_memory_invariants(state: &GameState) {
    let mg = &state.memory_game;
    assert!(mg.flipped_cards.len() <= 2);
    for id in &mg.flipped_cards {
        let card = mg.card(*id).expect("flipped id names a card");
        assert!(card.is_flipped && !card.is_matched);
    }
    for card in &mg.cards {
        if card.is_matched {
            assert!(card.is_flipped);
        }
    }
    let matched = mg.cards.iter().filter(|c| c.is_matched).count() as u32;
    assert_eq!(matched, mg.matched_pairs * 2);
    assert_eq!(mg.is_game_complete, !mg.cards.is_empty() && mg.matched_pairs == 6);
}

proptest! {
    #[test]
    fn invariants_hold_for_any_sequence(seed in any::<u64>(), actions in action_seq(80)) {
        init_tracing();
        let mut st = GameStore::new(Some(seed));
        for action in actions {
            let before = st.state().clone();
            st.dispatch(action.clone());
            let after = st.state();

            check_memory_invariants(after);
            prop_assert!(after.lives <= 3);

            let mut dedup = after.completed_stages.clone();
            dedup.sort();
            dedup.dedup();
            prop_assert_eq!(dedup.len(), after.completed_stages.len());

            if action == Action::AdvanceStage {
                let expected = before.current_stage.next().unwrap_or(before.current_stage);
                prop_assert_eq!(after.current_stage, expected);
            }
        }
    }

    #[test]
    fn deal_always_yields_six_pairs(seed in any::<u64>()) {
        let mut st = GameStore::new(Some(seed));
        st.dispatch(Action::InitMemoryGame);
        let mg = &st.state().memory_game;
        prop_assert_eq!(mg.cards.len(), 12);
        for face in mg.cards.iter().map(|c| c.character) {
            prop_assert_eq!(mg.cards.iter().filter(|c| c.character == face).count(), 2);
        }
        prop_assert_eq!(mg.matched_pairs, 0);
        prop_assert!(mg.flipped_cards.is_empty());
    }

    #[test]
    fn reset_always_restores_initial_state(seed in any::<u64>(), actions in action_seq(40)) {
        let mut st = GameStore::new(Some(seed));
        for action in actions {
            st.dispatch(action);
        }
        st.dispatch(Action::ResetGame);
        prop_assert_eq!(st.state(), &GameState::default());
    }

    #[test]
    fn auto_return_preserves_lives_and_progress(seed in any::<u64>(), actions in action_seq(40)) {
        let mut st = GameStore::new(Some(seed));
        for action in actions {
            st.dispatch(action);
        }
        let before = st.state().clone();
        st.dispatch(Action::AutoReturnToMain);
        let after = st.state();
        prop_assert_eq!(after.current_stage, Stage::Intro);
        prop_assert_eq!(after.lives, before.lives);
        prop_assert_eq!(&after.completed_stages, &before.completed_stages);
        prop_assert_eq!(after.is_game_paused, before.is_game_paused);
        prop_assert_eq!(after.maze_position, before.maze_position);
        prop_assert_eq!(after.score, 0);
    }
}
