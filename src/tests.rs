#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::collections::BTreeSet;
    use std::num::NonZero;
    use std::rc::Rc;

    use unordered_pair::UnorderedPair;
    use uuid::Uuid;

    use crate::error::GenerationError;
    use crate::generator;
    use crate::level::{
        GeneratedLevelData, GlyphPlacement, ObstacleKind, ObstaclePlacement, StoredGeneratedLevel,
    };
    use crate::location::{GridDimensions, Point};
    use crate::orchestrator::{CancelToken, GenerationOrchestrator, MAX_GENERATION_RETRIES};
    use crate::params::{
        GenerationParameters, ParameterViolation, PlayerProgression, PuzzleKind,
    };
    use crate::pathfind::{
        AStarPathfinder, GridData, PathConstraints, PathfindingAdapter, PathfindingError,
    };
    use crate::random::{RandomError, RandomProvider, SeededRandom};
    use crate::scaler;
    use crate::store::{JsonFileLevelStore, LevelStore, MemoryLevelStore, StoreError};
    use crate::template::{
        ColorMatchPuzzle, InitialGridState, LevelTemplate, PathPuzzle, SequencePuzzle,
        StockTemplate, StockTemplates, TemplateProvider,
    };
    use crate::validator;

    fn dims(columns: usize, rows: usize) -> GridDimensions {
        GridDimensions::new(columns, rows).unwrap()
    }

    fn all_kinds() -> BTreeSet<PuzzleKind> {
        [PuzzleKind::Path, PuzzleKind::Sequence, PuzzleKind::ColorMatch]
            .into_iter()
            .collect()
    }

    fn base_params(columns: usize, rows: usize) -> GenerationParameters {
        GenerationParameters {
            grid: dims(columns, rows),
            glyph_type_count: 3,
            min_glyph_pairs: 1,
            max_glyph_pairs: 2,
            max_obstacles: 2,
            allowed_puzzle_kinds: all_kinds(),
            difficulty_tier: 0,
        }
    }

    fn glyph(pair_id: usize, x: usize, y: usize) -> GlyphPlacement {
        GlyphPlacement {
            glyph_type: 0,
            position: Point(x, y),
            pair_id,
        }
    }

    fn obstacle(x: usize, y: usize) -> ObstaclePlacement {
        ObstaclePlacement {
            kind: ObstacleKind::Wall,
            position: Point(x, y),
        }
    }

    fn level_on(
        grid: GridDimensions,
        glyphs: Vec<GlyphPlacement>,
        obstacles: Vec<ObstaclePlacement>,
    ) -> GeneratedLevelData {
        let mut parameters = base_params(grid.columns.get(), grid.rows.get());
        parameters.max_obstacles = obstacles.len();

        GeneratedLevelData {
            grid,
            glyphs,
            obstacles,
            solutions: Vec::new(),
            seed: "fixed-test-seed".to_owned(),
            parameters,
        }
    }

    #[test]
    fn same_seed_providers_draw_identical_streams() {
        let mut left = SeededRandom::new();
        let mut right = SeededRandom::new();
        left.initialize("the-seed");
        right.initialize("the-seed");

        for _ in 0..8 {
            assert_eq!(
                left.next_int(0, 1000).unwrap(),
                right.next_int(0, 1000).unwrap()
            );
        }
        assert_eq!(left.next_float().unwrap(), right.next_float().unwrap());

        let mut first: Vec<usize> = (0..32).collect();
        let mut second: Vec<usize> = (0..32).collect();
        left.shuffle(&mut first).unwrap();
        right.shuffle(&mut second).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn reinitializing_replays_the_stream() {
        let mut random = SeededRandom::new();
        random.initialize("replay");
        let first: Vec<i64> = (0..5).map(|_| random.next_int(0, 100).unwrap()).collect();

        random.initialize("replay");
        let second: Vec<i64> = (0..5).map(|_| random.next_int(0, 100).unwrap()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn provider_misuse_is_rejected() {
        let mut random = SeededRandom::new();
        assert_eq!(random.next_int(0, 10), Err(RandomError::NotInitialized));
        assert_eq!(random.next_float(), Err(RandomError::NotInitialized));
        assert_eq!(
            random.shuffle(&mut [1, 2, 3]),
            Err(RandomError::NotInitialized)
        );

        random.initialize("seeded");
        assert_eq!(
            random.next_int(5, 5),
            Err(RandomError::InvalidRange { min: 5, max: 5 })
        );
        assert_eq!(
            random.next_int(3, 2),
            Err(RandomError::InvalidRange { min: 3, max: 2 })
        );
        assert!(random.next_int(0, 1).is_ok());
    }

    #[test]
    fn float_draws_stay_in_unit_interval() {
        let mut random = SeededRandom::new();
        random.initialize("floats");
        for _ in 0..100 {
            let value = random.next_float().unwrap();
            assert!((0.0..1.0).contains(&value), "{value} outside [0, 1)");
        }
    }

    #[test]
    fn generation_is_deterministic_per_seed() {
        let mut parameters = base_params(6, 6);
        parameters.min_glyph_pairs = 2;
        parameters.max_glyph_pairs = 4;
        parameters.max_obstacles = 3;

        for template in [
            StockTemplate::for_kind(PuzzleKind::Path),
            StockTemplate::for_kind(PuzzleKind::Sequence),
            StockTemplate::for_kind(PuzzleKind::ColorMatch),
        ] {
            let mut first_rng = SeededRandom::new();
            let mut second_rng = SeededRandom::new();

            let first =
                generator::generate(&parameters, "alpha", &template, &mut first_rng).unwrap();
            let second =
                generator::generate(&parameters, "alpha", &template, &mut second_rng).unwrap();

            assert_eq!(first.glyphs, second.glyphs);
            assert_eq!(first.obstacles, second.obstacles);
            assert!(first.solutions.is_empty());
        }
    }

    #[test]
    fn generate_rejects_empty_seed() {
        let parameters = base_params(5, 5);
        let mut random = SeededRandom::new();
        assert!(matches!(
            generator::generate(&parameters, "", &PathPuzzle, &mut random),
            Err(GenerationError::InvalidSeed)
        ));
    }

    #[test]
    fn generate_rejects_invalid_parameters() {
        let mut parameters = base_params(5, 5);
        parameters.min_glyph_pairs = 3;
        parameters.max_glyph_pairs = 2;

        let mut random = SeededRandom::new();
        assert!(matches!(
            generator::generate(&parameters, "seed", &PathPuzzle, &mut random),
            Err(GenerationError::InvalidParameters(
                ParameterViolation::PairBoundsInverted { min: 3, max: 2 }
            ))
        ));

        let mut parameters = base_params(5, 5);
        parameters.allowed_puzzle_kinds.clear();
        assert!(matches!(
            generator::generate(&parameters, "seed", &PathPuzzle, &mut random),
            Err(GenerationError::InvalidParameters(
                ParameterViolation::EmptyPuzzleKinds
            ))
        ));
    }

    fn assert_template_contract(state: &InitialGridState, parameters: &GenerationParameters) {
        let mut pair_sizes = std::collections::BTreeMap::new();
        for glyph in &state.glyphs {
            assert!(parameters.grid.contains(glyph.position));
            assert!(glyph.glyph_type < parameters.glyph_type_count);
            *pair_sizes.entry(glyph.pair_id).or_insert(0usize) += 1;
        }
        for (pair_id, size) in &pair_sizes {
            assert!(*pair_id > 0);
            assert_eq!(*size, 2, "pair {pair_id} has {size} placements");
        }
        assert!(pair_sizes.len() >= parameters.min_glyph_pairs);
        assert!(pair_sizes.len() <= parameters.max_glyph_pairs);

        assert!(state.obstacles.len() <= parameters.max_obstacles);

        let mut occupied = BTreeSet::new();
        for position in state
            .glyphs
            .iter()
            .map(|g| g.position)
            .chain(state.obstacles.iter().map(|o| o.position))
        {
            assert!(occupied.insert(position), "cell {position} used twice");
        }
    }

    #[test]
    fn path_template_respects_contract() {
        let mut parameters = base_params(7, 7);
        parameters.min_glyph_pairs = 2;
        parameters.max_glyph_pairs = 4;
        parameters.max_obstacles = 5;

        for seed in ["one", "two", "three"] {
            let mut random = SeededRandom::new();
            random.initialize(seed);
            let state = PathPuzzle
                .initialize_grid(parameters.grid, &parameters, &mut random)
                .unwrap();
            assert_template_contract(&state, &parameters);
        }
    }

    #[test]
    fn sequence_template_cycles_types_and_halves_obstacles() {
        let mut parameters = base_params(7, 7);
        parameters.min_glyph_pairs = 3;
        parameters.max_glyph_pairs = 5;
        parameters.glyph_type_count = 2;
        parameters.max_obstacles = 6;

        let mut random = SeededRandom::new();
        random.initialize("sequence");
        let state = SequencePuzzle
            .initialize_grid(parameters.grid, &parameters, &mut random)
            .unwrap();
        assert_template_contract(&state, &parameters);
        assert!(state.obstacles.len() <= parameters.max_obstacles / 2);

        for glyph in &state.glyphs {
            assert_eq!(glyph.glyph_type, (glyph.pair_id - 1) % 2);
        }
    }

    #[test]
    fn color_match_template_keeps_obstacles_off_the_border() {
        let mut parameters = base_params(8, 6);
        parameters.max_obstacles = 8;

        let mut random = SeededRandom::new();
        random.initialize("color");
        let state = ColorMatchPuzzle
            .initialize_grid(parameters.grid, &parameters, &mut random)
            .unwrap();
        assert_template_contract(&state, &parameters);

        for obstacle in &state.obstacles {
            let Point(x, y) = obstacle.position;
            assert!(x > 0 && y > 0 && x < 7 && y < 5, "obstacle {} on border", obstacle.position);
        }
    }

    #[test]
    fn stock_selection_is_deterministic_per_seed() {
        let parameters = base_params(5, 5);
        let mut first = SeededRandom::new();
        let mut second = SeededRandom::new();
        first.initialize("choose");
        second.initialize("choose");

        let a = StockTemplates.select(&parameters, &mut first).unwrap();
        let b = StockTemplates.select(&parameters, &mut second).unwrap();
        assert_eq!(a.kind(), b.kind());
        assert!(parameters.allowed_puzzle_kinds.contains(&a.kind()));
    }

    #[test]
    fn scaling_matches_the_documented_formulas() {
        let mut base = base_params(5, 5);
        base.glyph_type_count = 3;
        base.min_glyph_pairs = 2;
        base.max_glyph_pairs = 3;
        base.max_obstacles = 2;
        base.difficulty_tier = 0;

        let scaled = scaler::scale_parameters(
            &base,
            &PlayerProgression {
                current_zone: 4,
                procedural_levels_completed: 20,
            },
        );

        assert_eq!(scaled.max_glyph_pairs, 7);
        assert_eq!(scaled.min_glyph_pairs, 4);
        assert_eq!(scaled.glyph_type_count, 5);
        assert_eq!(scaled.max_obstacles, 6);
        assert_eq!(scaled.difficulty_tier, 2);
        assert_eq!(scaled.grid, base.grid);
        assert_eq!(scaled.allowed_puzzle_kinds, base.allowed_puzzle_kinds);
        scaled.validate().unwrap();
    }

    #[test]
    fn scaling_always_preserves_invariants() {
        let base = base_params(9, 9);

        for zone in (0..=40).step_by(3) {
            for completed in (0..=120).step_by(11) {
                let scaled = scaler::scale_parameters(
                    &base,
                    &PlayerProgression {
                        current_zone: zone,
                        procedural_levels_completed: completed,
                    },
                );

                scaled.validate().unwrap();
                assert!(scaled.min_glyph_pairs <= scaled.max_glyph_pairs);
                assert!(scaled.glyph_type_count <= scaler::GLYPH_TYPE_CAP);
                assert!(scaled.min_glyph_pairs <= scaler::MIN_PAIR_CAP);
                assert!(scaled.max_glyph_pairs <= scaler::MAX_PAIR_CAP);
                assert!(scaled.max_obstacles <= scaler::OBSTACLE_CAP);
                assert!(scaled.difficulty_tier <= scaler::TIER_CAP);
            }
        }
    }

    #[test]
    fn open_three_by_one_pair_is_solvable() {
        let level = level_on(dims(3, 1), vec![glyph(1, 0, 0), glyph(1, 2, 0)], vec![]);

        let solutions = validator::find_solution_paths(&level, &AStarPathfinder).unwrap();
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].pair_id, NonZero::new(1).unwrap());
        assert_eq!(
            solutions[0].endpoints(),
            UnorderedPair(Point(0, 0), Point(2, 0))
        );
        assert_eq!(solutions[0].points.len(), 3);

        assert!(validator::is_solvable(&level, &AStarPathfinder).unwrap());
    }

    #[test]
    fn blocked_three_by_one_pair_is_unsolvable() {
        let level = level_on(
            dims(3, 1),
            vec![glyph(1, 0, 0), glyph(1, 2, 0)],
            vec![obstacle(1, 0)],
        );

        let solutions = validator::find_solution_paths(&level, &AStarPathfinder).unwrap();
        assert!(solutions.is_empty());
        assert!(!validator::is_solvable(&level, &AStarPathfinder).unwrap());
    }

    #[test]
    fn zero_pairs_is_trivially_solvable() {
        let empty = level_on(dims(4, 4), vec![], vec![obstacle(2, 2)]);
        assert!(validator::is_solvable(&empty, &AStarPathfinder).unwrap());

        // unpaired glyphs are decoration and require no path
        let decorated = level_on(dims(4, 4), vec![glyph(0, 1, 1)], vec![]);
        assert!(validator::is_solvable(&decorated, &AStarPathfinder).unwrap());
    }

    #[test]
    fn walled_off_pair_is_unsolvable() {
        let level = level_on(
            dims(5, 5),
            vec![glyph(1, 2, 2), glyph(1, 0, 0)],
            vec![
                obstacle(1, 2),
                obstacle(3, 2),
                obstacle(2, 1),
                obstacle(2, 3),
            ],
        );

        assert!(validator::find_solution_paths(&level, &AStarPathfinder)
            .unwrap()
            .is_empty());
        assert!(!validator::is_solvable(&level, &AStarPathfinder).unwrap());
    }

    #[test]
    fn malformed_pair_groups_are_unsolvable() {
        // three placements under one pair id
        let tripled = level_on(
            dims(5, 1),
            vec![glyph(1, 0, 0), glyph(1, 2, 0), glyph(1, 4, 0)],
            vec![],
        );
        assert!(validator::find_solution_paths(&tripled, &AStarPathfinder)
            .unwrap()
            .is_empty());
        assert!(!validator::is_solvable(&tripled, &AStarPathfinder).unwrap());

        // a pair id with a single placement
        let widowed = level_on(dims(5, 1), vec![glyph(1, 0, 0)], vec![]);
        assert!(!validator::is_solvable(&widowed, &AStarPathfinder).unwrap());
    }

    #[test]
    fn revalidation_reproduces_solution_endpoints() {
        let level = level_on(
            dims(6, 6),
            vec![glyph(1, 0, 0), glyph(1, 5, 5), glyph(2, 0, 5), glyph(2, 5, 0)],
            vec![obstacle(2, 2), obstacle(3, 3)],
        );

        let first = validator::find_solution_paths(&level, &AStarPathfinder).unwrap();
        let second = validator::find_solution_paths(&level, &AStarPathfinder).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn solution_paths_are_contiguous_and_avoid_obstacles() {
        let level = level_on(
            dims(5, 5),
            vec![glyph(1, 0, 0), glyph(1, 4, 4)],
            vec![obstacle(1, 0), obstacle(1, 1), obstacle(1, 2), obstacle(1, 3)],
        );

        let solutions = validator::find_solution_paths(&level, &AStarPathfinder).unwrap();
        assert_eq!(solutions.len(), 1);

        let blocked: BTreeSet<Point> = level.obstacles.iter().map(|o| o.position).collect();
        for window in solutions[0].points.windows(2) {
            assert_eq!(window[0].manhattan_distance(window[1]), 1);
        }
        for point in &solutions[0].points {
            assert!(level.grid.contains(*point));
            assert!(!blocked.contains(point));
        }
    }

    #[test]
    fn out_of_grid_endpoints_are_an_error() {
        let level = level_on(dims(3, 3), vec![], vec![]);
        let grid = GridData::from_level(&level);

        let result = AStarPathfinder.find_path(
            Point(5, 0),
            Point(0, 0),
            &grid,
            &PathConstraints::default(),
        );
        assert!(matches!(
            result,
            Err(PathfindingError::InvalidEndpoint { point: Point(5, 0), .. })
        ));
    }

    #[test]
    fn corner_cutting_is_blocked_by_default_constraints() {
        let level = level_on(dims(2, 2), vec![], vec![obstacle(1, 0), obstacle(0, 1)]);
        let grid = GridData::from_level(&level);

        let strict = PathConstraints {
            allow_diagonal: true,
            dont_cross_corners: true,
        };
        assert_eq!(
            AStarPathfinder
                .find_path(Point(0, 0), Point(1, 1), &grid, &strict)
                .unwrap(),
            None
        );

        let loose = PathConstraints {
            allow_diagonal: true,
            dont_cross_corners: false,
        };
        let cut = AStarPathfinder
            .find_path(Point(0, 0), Point(1, 1), &grid, &loose)
            .unwrap()
            .unwrap();
        assert_eq!(cut, vec![Point(0, 0), Point(1, 1)]);
    }

    #[test]
    fn level_renders_as_ascii_grid() {
        let level = level_on(
            dims(3, 2),
            vec![glyph(1, 0, 0), glyph(1, 2, 0)],
            vec![obstacle(1, 0)],
        );

        assert_eq!(format!("{}", level), "A#A\n...\n");
    }

    #[test]
    fn orchestrator_generates_verifies_and_records() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut base = base_params(6, 6);
        base.max_obstacles = 0; // an open grid is always solvable

        let mut orchestrator = GenerationOrchestrator::new(
            base,
            StockTemplates,
            AStarPathfinder,
            MemoryLevelStore::new(),
        );

        let mut random = SeededRandom::new();
        let level = orchestrator
            .generate_and_record_level(
                &PlayerProgression::default(),
                Some("level-under-test".to_owned()),
                &mut random,
                &CancelToken::new(),
            )
            .unwrap();

        assert!(!level.solutions.is_empty());
        let solved: BTreeSet<_> = level.solutions.iter().map(|s| s.pair_id).collect();
        assert_eq!(solved, level.required_pair_ids());

        let stored = orchestrator
            .store()
            .find_by_level_id("level-under-test")
            .unwrap()
            .unwrap();
        assert_eq!(stored.seed, level.seed);
        assert_eq!(stored.parameters, level.parameters);
        assert_eq!(stored.solutions, level.solutions);
        assert_eq!(stored.version, 1);
    }

    /// Always emits a single widowed glyph, which the validator can never solve.
    #[derive(Clone, Copy, Default)]
    struct WidowedTemplate;

    impl LevelTemplate for WidowedTemplate {
        fn kind(&self) -> PuzzleKind {
            PuzzleKind::Path
        }

        fn initialize_grid<R: RandomProvider>(
            &self,
            _grid: GridDimensions,
            _parameters: &GenerationParameters,
            _random: &mut R,
        ) -> Result<InitialGridState, RandomError> {
            Ok(InitialGridState {
                glyphs: vec![glyph(1, 0, 0)],
                obstacles: vec![],
            })
        }
    }

    #[derive(Clone, Default)]
    struct CountingWidowedTemplates {
        selections: Rc<Cell<usize>>,
    }

    impl TemplateProvider for CountingWidowedTemplates {
        type Template = WidowedTemplate;

        fn select<R: RandomProvider>(
            &self,
            _parameters: &GenerationParameters,
            _random: &mut R,
        ) -> Result<WidowedTemplate, RandomError> {
            self.selections.set(self.selections.get() + 1);
            Ok(WidowedTemplate)
        }
    }

    #[test]
    fn retry_budget_is_exactly_five_attempts() {
        let _ = env_logger::builder().is_test(true).try_init();

        let templates = CountingWidowedTemplates::default();
        let selections = Rc::clone(&templates.selections);

        let mut orchestrator = GenerationOrchestrator::new(
            base_params(5, 5),
            templates,
            AStarPathfinder,
            MemoryLevelStore::new(),
        );

        let mut random = SeededRandom::new();
        let result = orchestrator.generate_and_record_level(
            &PlayerProgression::default(),
            None,
            &mut random,
            &CancelToken::new(),
        );

        assert_eq!(selections.get(), MAX_GENERATION_RETRIES);
        match result {
            Err(GenerationError::UnsolvableLevel { attempts, parameters }) => {
                assert_eq!(attempts, MAX_GENERATION_RETRIES);
                assert_eq!(parameters.grid, dims(5, 5));
            }
            other => panic!("expected UnsolvableLevel, got {other:?}"),
        }
        assert!(orchestrator.store().is_empty());
    }

    #[test]
    fn unsolvable_error_carries_scaled_parameters() {
        let mut base = base_params(5, 5);
        base.min_glyph_pairs = 2;
        base.max_glyph_pairs = 3;

        let mut orchestrator = GenerationOrchestrator::new(
            base,
            CountingWidowedTemplates::default(),
            AStarPathfinder,
            MemoryLevelStore::new(),
        );

        let mut random = SeededRandom::new();
        let result = orchestrator.generate_and_record_level(
            &PlayerProgression {
                current_zone: 4,
                procedural_levels_completed: 20,
            },
            None,
            &mut random,
            &CancelToken::new(),
        );

        match result {
            Err(GenerationError::UnsolvableLevel { parameters, .. }) => {
                assert_eq!(parameters.min_glyph_pairs, 4);
                assert_eq!(parameters.max_glyph_pairs, 7);
            }
            other => panic!("expected UnsolvableLevel, got {other:?}"),
        }
    }

    #[test]
    fn cancellation_stops_before_the_next_attempt() {
        let mut orchestrator = GenerationOrchestrator::new(
            base_params(5, 5),
            StockTemplates,
            AStarPathfinder,
            MemoryLevelStore::new(),
        );

        let cancel = CancelToken::new();
        cancel.cancel();

        let mut random = SeededRandom::new();
        let result = orchestrator.generate_and_record_level(
            &PlayerProgression::default(),
            None,
            &mut random,
            &cancel,
        );

        assert!(matches!(result, Err(GenerationError::Cancelled)));
        assert!(orchestrator.store().is_empty());
    }

    #[test]
    fn empty_allowed_kinds_fail_before_any_attempt() {
        let mut base = base_params(5, 5);
        base.allowed_puzzle_kinds.clear();

        let mut orchestrator = GenerationOrchestrator::new(
            base,
            StockTemplates,
            AStarPathfinder,
            MemoryLevelStore::new(),
        );

        let mut random = SeededRandom::new();
        let result = orchestrator.generate_and_record_level(
            &PlayerProgression::default(),
            None,
            &mut random,
            &CancelToken::new(),
        );

        assert!(matches!(
            result,
            Err(GenerationError::InvalidParameters(
                ParameterViolation::EmptyPuzzleKinds
            ))
        ));
    }

    #[test]
    fn promotion_generates_a_uuid_when_no_id_is_supplied() {
        let level = level_on(dims(3, 3), vec![glyph(1, 0, 0), glyph(1, 2, 2)], vec![]);

        let stored = StoredGeneratedLevel::promote(&level, None);
        assert!(Uuid::parse_str(&stored.level_id).is_ok());
        assert_eq!(stored.version, 1);
        assert_eq!(stored.seed, level.seed);

        let named = StoredGeneratedLevel::promote(&level, Some("named".to_owned()));
        assert_eq!(named.level_id, "named");
    }

    #[test]
    fn memory_store_refuses_duplicate_ids() {
        let level = level_on(dims(3, 3), vec![], vec![]);
        let stored = StoredGeneratedLevel::promote(&level, Some("dup".to_owned()));

        let mut store = MemoryLevelStore::new();
        store.save(&stored).unwrap();
        assert!(matches!(
            store.save(&stored),
            Err(StoreError::Conflict(id)) if id == "dup"
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn json_file_store_round_trips_and_conflicts() {
        let root = std::env::temp_dir().join(format!("glyphweave-test-{}", Uuid::new_v4()));
        let mut store = JsonFileLevelStore::new(&root);

        let level = level_on(
            dims(4, 4),
            vec![glyph(1, 0, 0), glyph(1, 3, 3)],
            vec![obstacle(2, 2)],
        );
        let stored = StoredGeneratedLevel::promote(&level, Some("on-disk".to_owned()));

        store.save(&stored).unwrap();
        let loaded = store.find_by_level_id("on-disk").unwrap().unwrap();
        assert_eq!(loaded, stored);

        assert!(matches!(
            store.save(&stored),
            Err(StoreError::Conflict(id)) if id == "on-disk"
        ));
        assert_eq!(store.find_by_level_id("missing").unwrap(), None);

        let _ = std::fs::remove_dir_all(&root);
    }
}
