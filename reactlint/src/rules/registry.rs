//! Mapping from stable rule ids to rule implementations.

use crate::config::Config;
use crate::error::LintError;
use crate::rules::ids::ALL_RULE_IDS;
use crate::rules::{react, typescript, Rule, RuleMetadata};
use rustc_hash::FxHashMap;

/// Ordered set of rules keyed by id.
///
/// Iteration follows registration order, which is also the order in which a
/// [`Linter`](crate::linter::Linter) reports diagnostics.
#[derive(Default)]
pub struct RuleRegistry {
    rules: Vec<Rule>,
    index: FxHashMap<&'static str, usize>,
}

impl std::fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.ids()).finish()
    }
}

impl RuleRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every built-in rule, configured from `config`, ignoring its selection
    /// lists.
    #[must_use]
    pub fn all(config: &Config) -> Self {
        let mut rules = typescript::get_typescript_rules(config);
        rules.extend(react::get_react_rules(config));
        rules.sort_by_key(|rule| {
            ALL_RULE_IDS
                .iter()
                .position(|id| *id == rule.id())
                .unwrap_or(ALL_RULE_IDS.len())
        });

        let mut registry = Self::new();
        for rule in rules {
            registry.register(rule);
        }
        registry
    }

    /// Built-in rules enabled by `config` (`rules` allow-list minus `ignore`).
    ///
    /// # Errors
    /// Returns [`LintError::UnknownRule`] if either list names an unknown id
    pub fn from_config(config: &Config) -> Result<Self, LintError> {
        let settings = &config.reactlint;
        for id in settings
            .rules
            .iter()
            .flatten()
            .chain(settings.ignore.iter().flatten())
        {
            if !ALL_RULE_IDS.contains(&id.as_str()) {
                return Err(LintError::UnknownRule(id.clone()));
            }
        }
        let mut registry = Self::all(config);
        registry.retain(|rule| settings.is_enabled(rule.id()));
        Ok(registry)
    }

    /// Add a rule, replacing any rule with the same id in place.
    pub fn register(&mut self, rule: Rule) {
        let id = rule.id();
        if let Some(&slot) = self.index.get(id) {
            self.rules[slot] = rule;
        } else {
            self.index.insert(id, self.rules.len());
            self.rules.push(rule);
        }
    }

    /// Look up a rule by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Rule> {
        self.index.get(id).map(|&slot| &self.rules[slot])
    }

    /// Whether a rule with this id is registered.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Registered ids, in order.
    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.rules.iter().map(Rule::id)
    }

    /// Registered rules, in order.
    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Registered rules as a slice, in order.
    #[must_use]
    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    /// Metadata of every registered rule, in order.
    #[must_use]
    pub fn metadata(&self) -> Vec<RuleMetadata> {
        self.rules.iter().map(Rule::metadata).collect()
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Keep only the rules named in `ids`, preserving registry order.
    ///
    /// # Errors
    /// Returns [`LintError::UnknownRule`] for an id that is not registered
    pub fn select<S: AsRef<str>>(mut self, ids: &[S]) -> Result<Self, LintError> {
        if let Some(unknown) = ids.iter().find(|id| !self.contains(id.as_ref())) {
            return Err(LintError::UnknownRule(unknown.as_ref().to_owned()));
        }
        self.retain(|rule| ids.iter().any(|id| id.as_ref() == rule.id()));
        Ok(self)
    }

    /// Drop every rule for which `keep` returns false.
    pub fn retain(&mut self, mut keep: impl FnMut(&Rule) -> bool) {
        self.rules.retain(|rule| keep(rule));
        self.index = self
            .rules
            .iter()
            .enumerate()
            .map(|(slot, rule)| (rule.id(), slot))
            .collect();
    }
}

impl<'a> IntoIterator for &'a RuleRegistry {
    type Item = &'a Rule;
    type IntoIter = std::slice::Iter<'a, Rule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
