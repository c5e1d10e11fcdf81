//! Headless input scripts
//!
//! A script is a TOML list of steps replayed without a terminal:
//!
//! ```toml
//! [[step]]
//! node = "vertex1"            # type whatever word labels vertex1
//!
//! [[step]]
//! edge = ["vertex1", "vertex2"] # type the vertex1 -> vertex2 choice
//! wait = 200                  # then idle for 200 ticks
//!
//! [[step]]
//! text = "abc"                # literal keystrokes
//! backspace = 2               # hold backspace for 2 ticks
//! ```
//!
//! Words are random, so `node` and `edge` resolve against the live state when
//! the step runs.

use serde::Deserialize;
use std::path::Path;

use super::events::GameEvent;
use super::state::GameState;
use super::tick::{run_idle, update};
use crate::core::error::{GameError, Result};
use crate::interaction::TickInput;
use crate::words::EntityRef;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Script {
    #[serde(rename = "step", default)]
    pub steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScriptStep {
    /// Literal text typed in one tick
    #[serde(default)]
    pub text: Option<String>,
    /// Type the word on this node
    #[serde(default)]
    pub node: Option<String>,
    /// Type the word on the [from, to] travel choice
    #[serde(default)]
    pub edge: Option<[String; 2]>,
    /// Ticks to hold backspace after typing
    #[serde(default)]
    pub backspace: u32,
    /// Idle ticks at the end of the step
    #[serde(default)]
    pub wait: u32,
}

impl Script {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_toml(&content)
    }

    pub fn parse_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }
}

impl ScriptStep {
    /// Work out what this step types, against the current state
    fn resolve_text(&self, state: &GameState) -> Result<Option<String>> {
        let targets = [self.text.is_some(), self.node.is_some(), self.edge.is_some()];
        if targets.iter().filter(|&&set| set).count() > 1 {
            return Err(GameError::ScriptError(
                "a step may set only one of text, node, edge".into(),
            ));
        }

        if let Some(text) = &self.text {
            return Ok(Some(text.clone()));
        }

        if let Some(name) = &self.node {
            let node = state
                .graph
                .find_node(name)
                .ok_or_else(|| GameError::NodeNotFound(name.clone()))?;
            let word = state
                .word_for(EntityRef::Node(node))
                .ok_or_else(|| GameError::ScriptError(format!("node {} has no word", name)))?;
            return Ok(Some(word.to_string()));
        }

        if let Some([from, to]) = &self.edge {
            let source = state
                .graph
                .find_node(from)
                .ok_or_else(|| GameError::NodeNotFound(from.clone()))?;
            let dest = state
                .graph
                .find_node(to)
                .ok_or_else(|| GameError::NodeNotFound(to.clone()))?;
            let word = state
                .word_for(EntityRef::Edge { dest, source })
                .ok_or_else(|| {
                    GameError::ScriptError(format!(
                        "no choice {} -> {} on screen (type {} first)",
                        from, to, from
                    ))
                })?;
            return Ok(Some(word.to_string()));
        }

        Ok(None)
    }
}

/// Replay a script against the state; returns every event it produced
pub fn run_script(state: &mut GameState, script: &Script) -> Result<Vec<GameEvent>> {
    let mut events = Vec::new();

    for (idx, step) in script.steps.iter().enumerate() {
        let text = step.resolve_text(state).map_err(|err| match err {
            GameError::ScriptError(msg) => GameError::ScriptError(format!("step {}: {}", idx + 1, msg)),
            other => other,
        })?;

        if let Some(text) = text {
            events.extend(update(state, &TickInput::typed(text)));
        }

        if step.backspace > 0 {
            for _ in 0..step.backspace {
                events.extend(update(state, &TickInput::backspace()));
            }
            events.extend(update(state, &TickInput::idle()));
        }

        events.extend(run_idle(state, step.wait));
    }

    Ok(events)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::campaign::Level;
    use crate::core::config::GameConfig;

    fn new_game() -> GameState {
        let config = GameConfig {
            seed: Some(9),
            ..GameConfig::default()
        };
        GameState::new(config, crate::words::DEFAULT_WORDS, Level::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_parse_script() {
        let script = Script::parse_toml(
            r#"
            [[step]]
            node = "vertex1"

            [[step]]
            edge = ["vertex1", "vertex3"]
            wait = 10
            "#,
        )
        .unwrap();
        assert_eq!(script.steps.len(), 2);
        assert_eq!(script.steps[1].edge.as_ref().unwrap()[1], "vertex3");
        assert_eq!(script.steps[1].wait, 10);
    }

    #[test]
    fn test_unknown_field_rejected() {
        assert!(Script::parse_toml("[[step]]\ntypo = 1").is_err());
    }

    #[test]
    fn test_run_script_moves_unit() {
        let mut state = new_game();
        let script = Script::parse_toml(
            r#"
            [[step]]
            node = "vertex1"

            [[step]]
            edge = ["vertex1", "vertex3"]
            wait = 400
            "#,
        )
        .unwrap();

        let events = run_script(&mut state, &script).unwrap();
        let v3 = state.graph.find_node("vertex3").unwrap();
        assert!(events
            .iter()
            .any(|e| matches!(e, GameEvent::UnitArrived { node, .. } if *node == v3)));
        assert_eq!(state.army.units_at(v3).len(), 2);
    }

    #[test]
    fn test_edge_before_expand_is_error() {
        let mut state = new_game();
        let script = Script::parse_toml("[[step]]\nedge = [\"vertex1\", \"vertex2\"]").unwrap();
        let err = run_script(&mut state, &script).unwrap_err();
        assert!(matches!(err, GameError::ScriptError(msg) if msg.starts_with("step 1")));
    }

    #[test]
    fn test_text_and_backspace() {
        let mut state = new_game();
        let script = Script::parse_toml("[[step]]\ntext = \"qqq\"\nbackspace = 1").unwrap();
        run_script(&mut state, &script).unwrap();
        assert_eq!(state.buffer(), "qq");
        // typing tick + backspace tick + release tick
        assert_eq!(state.current_tick, 3);
    }

    #[test]
    fn test_conflicting_targets_rejected() {
        let mut state = new_game();
        let script = Script::parse_toml("[[step]]\ntext = \"a\"\nnode = \"vertex1\"").unwrap();
        assert!(matches!(
            run_script(&mut state, &script),
            Err(GameError::ScriptError(_))
        ));
    }
}
