//! Search box editing (pure state transitions).
//!
//! The search box filters live: every edit produces a new query that the pane
//! forwards to the table. Cursor positions count characters, not bytes.

/// Search box state.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SearchInput {
    /// Not focused. The table keeps whatever query was last committed.
    #[default]
    Idle,
    /// Focused and editing.
    Typing {
        /// Text typed so far.
        query: String,
        /// Cursor position, in characters.
        cursor: usize,
    },
}

impl SearchInput {
    /// Current text when editing.
    pub fn query(&self) -> Option<&str> {
        match self {
            SearchInput::Idle => None,
            SearchInput::Typing { query, .. } => Some(query),
        }
    }

    /// Whether the user is typing a query.
    pub fn is_typing(&self) -> bool {
        matches!(self, SearchInput::Typing { .. })
    }
}

fn byte_offset(query: &str, cursor: usize) -> usize {
    query
        .char_indices()
        .nth(cursor)
        .map_or(query.len(), |(offset, _)| offset)
}

/// Focus the search box, seeded with the table's current query.
///
/// No-op if already typing.
pub fn activate_search_input(state: SearchInput, current_query: &str) -> SearchInput {
    match state {
        SearchInput::Idle => SearchInput::Typing {
            query: current_query.to_string(),
            cursor: current_query.chars().count(),
        },
        other => other,
    }
}

/// Insert a character at the cursor and advance it.
pub fn handle_char_input(state: SearchInput, ch: char) -> SearchInput {
    match state {
        SearchInput::Typing { mut query, cursor } => {
            let at = byte_offset(&query, cursor);
            query.insert(at, ch);
            SearchInput::Typing {
                query,
                cursor: cursor + 1,
            }
        }
        other => other,
    }
}

/// Delete the character before the cursor.
pub fn handle_backspace(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { mut query, cursor } if cursor > 0 => {
            let at = byte_offset(&query, cursor - 1);
            query.remove(at);
            SearchInput::Typing {
                query,
                cursor: cursor - 1,
            }
        }
        other => other,
    }
}

/// Delete the character under the cursor.
pub fn handle_delete(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { mut query, cursor } => {
            if cursor < query.chars().count() {
                let at = byte_offset(&query, cursor);
                query.remove(at);
            }
            SearchInput::Typing { query, cursor }
        }
        other => other,
    }
}

/// Move the cursor one character left.
pub fn handle_cursor_left(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { query, cursor } => SearchInput::Typing {
            query,
            cursor: cursor.saturating_sub(1),
        },
        other => other,
    }
}

/// Move the cursor one character right.
pub fn handle_cursor_right(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { query, cursor } => {
            let max_cursor = query.chars().count();
            SearchInput::Typing {
                query,
                cursor: (cursor + 1).min(max_cursor),
            }
        }
        other => other,
    }
}

/// Move the cursor to the start of the query.
pub fn handle_home(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { query, .. } => SearchInput::Typing { query, cursor: 0 },
        other => other,
    }
}

/// Move the cursor to the end of the query.
pub fn handle_end(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { query, .. } => {
            let cursor = query.chars().count();
            SearchInput::Typing { query, cursor }
        }
        other => other,
    }
}

/// Leave the search box. The query stays applied.
pub fn submit_search(state: SearchInput) -> SearchInput {
    match state {
        SearchInput::Typing { .. } | SearchInput::Idle => SearchInput::Idle,
    }
}

#[cfg(test)]
#[path = "search_input_handler_tests.rs"]
mod tests;
