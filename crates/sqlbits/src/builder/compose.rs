//! Combining builders: sub-queries and externally built filters.

use super::{Builder, ParamContext};
use indexmap::IndexMap;

impl Builder {
    /// A pristine builder with the same dialect and collaborators, for
    /// building a filter or sub-query to merge back into this one.
    pub fn sibling(&self) -> Builder {
        Builder {
            dialect: self.dialect.clone(),
            data_source: self.data_source.clone(),
            sanitizer: self.sanitizer.clone(),
            transactions: self.transactions.clone(),
            depth: Default::default(),
            sql: String::new(),
            params: IndexMap::new(),
            param_sets: IndexMap::new(),
            ctx: ParamContext::default(),
            positional_sql: String::new(),
            positional_args: Vec::new(),
        }
    }

    /// Write `<prefix><column><op>(<sub-query>)` and merge the sub-query's
    /// parameters. `=` becomes `IN` and `<>` becomes `NOT IN`.
    ///
    /// Colliding parameter keys are overwritten by the sub-query's values.
    pub fn add_sub_query_for_column(&mut self, sub_query: &Builder, column: &str) -> &mut Self {
        let column = self.dialect.quote_identifier(column);
        self.sql.push_str(self.ctx.prefix());
        self.sql.push_str(&column);
        self.sql.push_str(self.ctx.list_operator());
        self.sql.push('(');
        self.sql.push_str(&sub_query.sql);
        self.sql.push(')');
        self.merge_params_from(sub_query);
        self
    }

    /// Append a filter built with [`start_filter`](Builder::start_filter)
    /// (`<prefix><filter text>`, no `WHERE` keyword of its own) and merge its
    /// parameters. An empty filter text only merges parameters.
    ///
    /// Colliding parameter keys are overwritten by the filter's values.
    pub fn apply_filter(&mut self, filter: &Builder) -> &mut Self {
        if !filter.sql.is_empty() {
            self.sql.push_str(self.ctx.prefix());
            self.sql.push_str(&filter.sql);
        }
        self.merge_params_from(filter);
        self
    }

    fn merge_params_from(&mut self, other: &Builder) {
        for (key, value) in &other.params {
            if !other.param_sets.contains_key(key) {
                self.param_sets.shift_remove(key);
            }
            self.params.insert(key.clone(), value.clone());
        }
        for (key, values) in &other.param_sets {
            self.param_sets.insert(key.clone(), values.clone());
        }
    }
}
