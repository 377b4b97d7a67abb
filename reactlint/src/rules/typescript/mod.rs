//! Rules for TypeScript language constructs.

use crate::config::Config;
use crate::rules::Rule;

mod new_promise;
mod sort_interfaces;

/// Returns every TypeScript rule, configured from `config`.
#[must_use]
pub fn get_typescript_rules(config: &Config) -> Vec<Rule> {
    vec![
        Rule::Syntactic(Box::new(new_promise::NewPromiseRule::new(
            config.reactlint.promise_sentinel(),
        ))),
        Rule::Syntactic(Box::new(sort_interfaces::SortInterfacesRule)),
    ]
}
