//! Centralized rule ids.

/// Functionality: returning a hand-built `new Promise(...)`
pub const RULE_ID_FAVOR_ASYNC: &str = "favor-async-to-new-promises";
/// Functionality: `value` prop that may receive undefined/null
pub const RULE_ID_NIL_VALUE_PROPS: &str = "react-disallow-nil-in-value-props";
/// Functionality: direct assignment into `this.state`
pub const RULE_ID_MUTATE_STATE: &str = "react-dont-mutate-state";

/// Style: unsorted JSX attributes
pub const RULE_ID_SORT_JSX_ATTRIBUTES: &str = "react-sort-jsx-element-attributes";

/// Maintainability: unsorted interface members
pub const RULE_ID_SORT_INTERFACES: &str = "sort-interfaces";

/// Every rule id, in registry order.
pub const ALL_RULE_IDS: [&str; 5] = [
    RULE_ID_FAVOR_ASYNC,
    RULE_ID_NIL_VALUE_PROPS,
    RULE_ID_MUTATE_STATE,
    RULE_ID_SORT_JSX_ATTRIBUTES,
    RULE_ID_SORT_INTERFACES,
];
