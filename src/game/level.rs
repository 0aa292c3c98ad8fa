// Tile level: parsing, per-tick simulation and rendering

use glam::Vec2;
use log::{debug, info, warn};
use thiserror::Error;

use crate::engine::assets::{AssetManager, TextureHandle};
use crate::engine::physics::CollisionManager;
use crate::engine::renderer::RenderTarget;
use crate::game::blocks::{Block, BlockKind};
use crate::game::characters::{Mario, MarioInput, MARIO_STATS};
use crate::game::object::GameObject;

/// World size of one level cell
pub const TILE_SIZE: f32 = 16.0 * MARIO_STATS.sprite_scale;

/// How far below the last row Mario may fall before respawning
const FALL_LIMIT: f32 = 2.0 * TILE_SIZE;

/// Level used when no level file is available
pub const DEFAULT_LEVEL: &str = "\
................................................................
................................................................
................................................................
................................................................
......................?.........................................
................................................................
................?...B?B?B.....................BBB?..............
.........................................??.....................
.................................##..............#..#...........
..M.........................##...##.........##...##..##.........
###########################################...##################
###########################################...##################
";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LevelError {
    #[error("Level has no tiles")]
    Empty,

    #[error("Level has no Mario spawn ('M')")]
    MissingSpawn,

    #[error("Level has more than one Mario spawn")]
    MultipleSpawns,

    #[error("Unknown tile {ch:?} at line {line}, column {column}")]
    UnknownTile { ch: char, line: usize, column: usize },
}

/// Textures a level draws with; `None` falls back to tinted placeholders
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelTextures {
    pub mario: Option<TextureHandle>,
    pub blocks: Option<TextureHandle>,
}

pub struct Level {
    mario: Mario,
    /// Every block is solid; block `i` is collision tile `i`
    blocks: Vec<Block>,
    collision: CollisionManager,
    spawn: Vec2,
    width: f32,
    height: f32,
    respawns: u32,
}

impl Level {
    /// Build a level from its ASCII description.
    ///
    /// `#` ground, `B` brick, `?` question block, `M` Mario, `.` or space
    /// empty. Each character is one tile, rows top to bottom.
    pub fn parse(source: &str, textures: LevelTextures) -> Result<Self, LevelError> {
        let mut blocks = Vec::new();
        let mut collision = CollisionManager::new();
        let mut spawn = None;
        let mut columns = 0;
        let mut rows = 0;

        for (row, line) in source.lines().enumerate() {
            for (column, ch) in line.chars().enumerate() {
                let position = Vec2::new(column as f32, row as f32) * TILE_SIZE;
                let kind = match ch {
                    '.' | ' ' => continue,
                    '#' => BlockKind::Ground,
                    'B' => BlockKind::Brick,
                    '?' => BlockKind::Question,
                    'M' => {
                        if spawn.replace(position).is_some() {
                            return Err(LevelError::MultipleSpawns);
                        }
                        columns = columns.max(column + 1);
                        rows = row + 1;
                        continue;
                    }
                    ch => {
                        return Err(LevelError::UnknownTile {
                            ch,
                            line: row + 1,
                            column: column + 1,
                        })
                    }
                };

                let block = Block::new(kind, textures.blocks, position);
                collision.add_solid(block.tile_bounds());
                blocks.push(block);
                columns = columns.max(column + 1);
                rows = row + 1;
            }
        }

        if blocks.is_empty() && spawn.is_none() {
            return Err(LevelError::Empty);
        }
        let spawn = spawn.ok_or(LevelError::MissingSpawn)?;

        let level = Self {
            mario: Mario::new(textures.mario, spawn),
            blocks,
            collision,
            spawn,
            width: columns as f32 * TILE_SIZE,
            height: rows as f32 * TILE_SIZE,
            respawns: 0,
        };
        info!(
            "Level loaded: {} blocks, {}x{} px, spawn at {:?}",
            level.blocks.len(),
            level.width,
            level.height,
            spawn
        );
        if let Some(solid) = level.collision.world_bounds() {
            debug!("Solid tiles span {:?}", solid);
        }
        Ok(level)
    }

    /// Load `name` from the asset levels directory, falling back to the
    /// built-in level when the file cannot be read
    pub fn load(
        assets: &AssetManager,
        name: &str,
        textures: LevelTextures,
    ) -> Result<Self, LevelError> {
        match assets.load_level_source(name) {
            Ok(source) => Self::parse(&source, textures),
            Err(err) => {
                warn!(
                    "Could not read level {}: {}; using the built-in level",
                    name, err
                );
                Self::parse(DEFAULT_LEVEL, textures)
            }
        }
    }

    pub fn mario(&self) -> &Mario {
        &self.mario
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn spawn(&self) -> Vec2 {
        self.spawn
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    pub fn height(&self) -> f32 {
        self.height
    }

    /// Times Mario fell out and was put back
    pub fn respawns(&self) -> u32 {
        self.respawns
    }

    /// Run the fixed steps one frame pays for.
    ///
    /// A jump press belongs to the frame, so only the first step sees it.
    pub fn advance(&mut self, steps: u32, dt: f32, mut input: MarioInput) {
        for _ in 0..steps {
            self.update(dt, input);
            input.jump_pressed = false;
        }
    }

    /// Advance the level by one fixed step
    pub fn update(&mut self, dt: f32, input: MarioInput) {
        self.mario.set_input(input);
        self.mario.update(dt);

        let resolution = self.collision.resolve(
            self.mario.previous_bounds(),
            self.mario.bounds(),
            self.mario.velocity(),
        );
        if let Some(index) = resolution.ceiling {
            if let Some(block) = self.blocks.get_mut(index) {
                if block.bump() {
                    debug!("Mario bumped block {} (emptied: {})", index, block.is_used());
                }
            }
        }
        self.mario.apply_collision(&resolution);
        self.keep_mario_inside();

        for block in &mut self.blocks {
            block.update(dt);
        }

        if self.mario.position().y > self.height + FALL_LIMIT {
            info!("Mario fell out of the level, respawning");
            self.mario.respawn(self.spawn);
            self.respawns += 1;
        }
    }

    /// The level's left edge is a wall
    fn keep_mario_inside(&mut self) {
        let position = self.mario.position();
        if position.x < 0.0 {
            self.mario.set_position(Vec2::new(0.0, position.y));
            let velocity = self.mario.velocity();
            self.mario.set_velocity(Vec2::new(velocity.x.max(0.0), velocity.y));
        }
    }

    /// Everything in the level in drawing order: blocks, then Mario on top
    pub fn objects(&self) -> impl Iterator<Item = &dyn GameObject> {
        self.blocks
            .iter()
            .map(|block| block as &dyn GameObject)
            .chain(std::iter::once(&self.mario as &dyn GameObject))
    }

    pub fn render(&self, target: &mut dyn RenderTarget) {
        for object in self.objects() {
            object.render(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FloatRect;
    use crate::engine::renderer::DrawList;
    use crate::game::characters::MarioStateKind;
    use std::fs;
    use tempfile::TempDir;

    const DT: f32 = 1.0 / 60.0;

    fn parse(source: &str) -> Result<Level, LevelError> {
        Level::parse(source, LevelTextures::default())
    }

    fn settle(level: &mut Level) {
        for _ in 0..10 {
            level.update(DT, MarioInput::default());
        }
    }

    #[test]
    fn test_parse_simple_level() {
        let level = parse("....\n.M.?\n####\n").unwrap();

        assert_eq!(level.blocks().len(), 5);
        assert_eq!(level.spawn(), Vec2::new(50.0, 50.0));
        assert_eq!(level.width(), 200.0);
        assert_eq!(level.height(), 150.0);
        assert_eq!(level.blocks()[0].kind(), BlockKind::Question);
        assert_eq!(
            level.blocks()[0].tile_bounds(),
            FloatRect::new(150.0, 50.0, 50.0, 50.0)
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(parse("").err(), Some(LevelError::Empty));
        assert_eq!(parse("....\n  \n").err(), Some(LevelError::Empty));
        assert_eq!(parse("###").err(), Some(LevelError::MissingSpawn));
        assert_eq!(parse("M.M\n###").err(), Some(LevelError::MultipleSpawns));
        assert_eq!(
            parse("M..\n#x#").err(),
            Some(LevelError::UnknownTile {
                ch: 'x',
                line: 2,
                column: 2
            })
        );
    }

    #[test]
    fn test_default_level_parses() {
        let level = parse(DEFAULT_LEVEL).unwrap();
        assert!(level.blocks().len() > 100);
        assert!(level.width() > 800.0);
    }

    #[test]
    fn test_mario_stands_on_ground() {
        let mut level = parse("M..\n###").unwrap();
        settle(&mut level);

        for _ in 0..60 {
            level.update(DT, MarioInput::default());
            assert!(level.mario().is_ground());
        }
        assert!((level.mario().bounds().bottom() - 50.0).abs() < 1.0);
        assert_eq!(level.mario().state(), MarioStateKind::Idle);
    }

    #[test]
    fn test_wall_stops_mario() {
        let mut level = parse("........\nM....#..\n########").unwrap();
        settle(&mut level);

        let run = MarioInput {
            horizontal: 1.0,
            ..Default::default()
        };
        for _ in 0..120 {
            level.update(DT, run);
        }

        assert!(level.mario().bounds().right() <= 250.0 + 1e-3);
        assert!(level.mario().bounds().right() > 240.0);
        assert!(level.mario().is_ground());
    }

    #[test]
    fn test_left_edge_is_a_wall() {
        let mut level = parse("M..\n###").unwrap();
        settle(&mut level);

        let run_left = MarioInput {
            horizontal: -1.0,
            ..Default::default()
        };
        for _ in 0..30 {
            level.update(DT, run_left);
        }
        assert_eq!(level.mario().position().x, 0.0);
    }

    #[test]
    fn test_jump_bumps_question_block() {
        let mut level = parse("......\n..?...\n......\n..M...\n######").unwrap();
        settle(&mut level);
        assert!(level.mario().is_ground());

        level.update(
            DT,
            MarioInput {
                jump_pressed: true,
                jump_held: true,
                ..Default::default()
            },
        );
        assert_eq!(level.mario().state(), MarioStateKind::Jump);

        let held = MarioInput {
            jump_held: true,
            ..Default::default()
        };
        for _ in 0..20 {
            level.update(DT, held);
        }

        assert!(level.blocks()[0].is_used());
        assert!(level.mario().is_jump_over());
        assert!(level.mario().bounds().top >= 100.0 - 1e-3);

        for _ in 0..120 {
            level.update(DT, MarioInput::default());
        }
        assert!(level.mario().is_ground());
        assert_eq!(level.mario().state(), MarioStateKind::Idle);
    }

    fn press_jump() -> MarioInput {
        MarioInput {
            jump_pressed: true,
            ..Default::default()
        }
    }

    /// Level where Mario drops one tile, and the steps his fall takes
    fn drop_level() -> (Level, usize) {
        let source = "M\n.\n#";
        let mut level = parse(source).unwrap();
        let mut steps = 0;
        while !level.mario().is_ground() {
            level.update(DT, MarioInput::default());
            steps += 1;
            assert!(steps < 200, "Mario never landed");
        }

        let mut fresh = parse(source).unwrap();
        for _ in 0..steps - 1 {
            fresh.update(DT, MarioInput::default());
        }
        assert!(!fresh.mario().is_ground());
        (fresh, steps)
    }

    #[test]
    fn test_jump_edge_only_first_step() {
        // Pressed one step before landing: too early to jump
        let (mut level, _) = drop_level();
        level.advance(4, DT, press_jump());

        assert!(level.mario().is_ground());
        assert_eq!(level.mario().state(), MarioStateKind::Idle);
    }

    #[test]
    fn test_repeated_jump_press_after_landing_jumps() {
        let (mut level, _) = drop_level();
        for _ in 0..4 {
            level.update(DT, press_jump());
        }
        assert_eq!(level.mario().state(), MarioStateKind::Jump);
    }

    #[test]
    fn test_advance_runs_every_step() {
        let mut level = parse("M\n.\n#").unwrap();
        let (_, steps) = drop_level();

        level.advance(steps as u32, DT, MarioInput::default());
        assert!(level.mario().is_ground());
    }

    #[test]
    fn test_walk_off_ledge_stays_walk() {
        let mut level = parse("M....\n#....\n.....\n.....\n.....").unwrap();
        settle(&mut level);

        let run = MarioInput {
            horizontal: 1.0,
            ..Default::default()
        };
        let mut steps = 0;
        while level.mario().is_ground() {
            level.update(DT, run);
            steps += 1;
            assert!(steps < 200, "Mario never left the ledge");
        }
        assert_eq!(level.mario().state(), MarioStateKind::Walk);

        let top = level.mario().position().y;
        for _ in 0..10 {
            level.update(
                DT,
                MarioInput {
                    jump_pressed: true,
                    ..run
                },
            );
        }

        assert_eq!(level.mario().state(), MarioStateKind::Walk);
        assert!(!level.mario().is_ground());
        assert!(level.mario().velocity().y > 0.0);
        assert!(level.mario().position().y > top);
    }

    #[test]
    fn test_falling_out_respawns() {
        let mut level = parse("M...\n....\n..##").unwrap();
        for _ in 0..120 {
            level.update(DT, MarioInput::default());
        }
        assert!(level.respawns() >= 1);
        assert!(level.mario().position().y <= level.height() + FALL_LIMIT);
    }

    #[test]
    fn test_render_draws_mario_last() {
        let level = parse("M..\n###").unwrap();
        let mut list = DrawList::new();
        level.render(&mut list);

        assert_eq!(list.len(), 4);
        assert_eq!(
            list.commands().last().map(|c| c.destination),
            Some(level.mario().bounds())
        );
    }

    #[test]
    fn test_objects_in_draw_order() {
        let level = parse("M?\n#B").unwrap();
        let types: Vec<&str> = level.objects().map(|object| object.object_type()).collect();
        assert_eq!(types, vec!["Question", "Ground", "Brick", "Mario"]);
    }

    #[test]
    fn test_load_falls_back_to_default() {
        let dir = TempDir::new().unwrap();
        let assets = AssetManager::new(dir.path());

        let level = Level::load(&assets, "missing.txt", LevelTextures::default()).unwrap();
        assert_eq!(level.blocks().len(), parse(DEFAULT_LEVEL).unwrap().blocks().len());
    }

    #[test]
    fn test_load_from_assets() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("Levels")).unwrap();
        fs::write(dir.path().join("Levels").join("tiny.txt"), "M.\n##\n").unwrap();
        let assets = AssetManager::new(dir.path());

        let level = Level::load(&assets, "tiny.txt", LevelTextures::default()).unwrap();
        assert_eq!(level.blocks().len(), 2);
    }
}
