use std::collections::HashMap;

use tracing::Level;

use crate::LogTargetConfig;

/// Module-path trie; the deepest matching node decides the level.
#[derive(Debug, Default)]
pub(crate) struct FilterTrie {
    level:    Option<Level>,
    children: HashMap<String, FilterTrie>,
}

impl FilterTrie {
    pub(crate) fn from_statements<'a>(
        statements: impl IntoIterator<Item = &'a LogTargetConfig>,
    ) -> Self {
        let mut root = Self::default();
        for statement in statements {
            let node = statement
                .path
                .iter()
                .fold(&mut root, |node, segment| {
                    node.children.entry(segment.clone()).or_default()
                });
            node.level = Some(statement.level);
        }
        root
    }

    pub(crate) fn level_for_target<'a>(
        &self,
        target: impl IntoIterator<Item = &'a str>,
    ) -> Option<Level> {
        let mut node = self;
        let mut level = self.level;
        for segment in target {
            let Some(child) = node.children.get(segment) else {
                break
            };
            node = child;
            level = child.level.or(level);
        }
        level
    }
}
