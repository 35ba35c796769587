//! Lifecycle of an asynchronously loaded view.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Index/offset pair a list restores its scroll position from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScrollPosition {
    pub index: usize,
    pub offset: i32,
}

impl ScrollPosition {
    pub const ZERO: ScrollPosition = ScrollPosition { index: 0, offset: 0 };

    pub const fn new(index: usize, offset: i32) -> Self {
        Self { index, offset }
    }
}

/// Payload of [`UiState::Success`]. `data` may be absent even on success.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Success<T> {
    pub data: Option<T>,
    pub scroll_index: usize,
    pub scroll_offset: i32,
}

impl<T> Success<T> {
    pub fn new(data: T) -> Self {
        Self {
            data: Some(data),
            scroll_index: 0,
            scroll_offset: 0,
        }
    }

    pub fn with_scroll_position(mut self, position: ScrollPosition) -> Self {
        self.scroll_index = position.index;
        self.scroll_offset = position.offset;
        self
    }

    pub fn scroll_position(&self) -> ScrollPosition {
        ScrollPosition::new(self.scroll_index, self.scroll_offset)
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Success<U> {
        Success {
            data: self.data.map(f),
            scroll_index: self.scroll_index,
            scroll_offset: self.scroll_offset,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorState {
    pub message: Option<String>,
}

impl ErrorState {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

/// State a view-model hands to [`StatefulContainer`](crate::StatefulContainer).
///
/// Exactly one variant is active. Moving to another variant replaces the
/// previous one; nothing carries over.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum UiState<T> {
    /// Nothing fetched yet.
    Initial,
    /// Fetch in progress with no prior data.
    Loading,
    Success(Success<T>),
    /// Fetch completed with zero results.
    Empty,
    Error(ErrorState),
}

/// Variant tag of a [`UiState`]; containers switch on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UiStateKind {
    Initial,
    Loading,
    Success,
    Empty,
    Error,
}

impl UiStateKind {
    pub const ALL: [UiStateKind; 5] = [
        UiStateKind::Initial,
        UiStateKind::Loading,
        UiStateKind::Success,
        UiStateKind::Empty,
        UiStateKind::Error,
    ];
}

impl fmt::Display for UiStateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UiStateKind::Initial => "initial",
            UiStateKind::Loading => "loading",
            UiStateKind::Success => "success",
            UiStateKind::Empty => "empty",
            UiStateKind::Error => "error",
        };
        f.write_str(name)
    }
}

impl<T> UiState<T> {
    pub fn success(data: T) -> Self {
        UiState::Success(Success::new(data))
    }

    pub fn error(message: impl Into<String>) -> Self {
        UiState::Error(ErrorState::new(message))
    }

    pub fn kind(&self) -> UiStateKind {
        match self {
            UiState::Initial => UiStateKind::Initial,
            UiState::Loading => UiStateKind::Loading,
            UiState::Success(_) => UiStateKind::Success,
            UiState::Empty => UiStateKind::Empty,
            UiState::Error(_) => UiStateKind::Error,
        }
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            UiState::Success(success) => success.data.as_ref(),
            _ => None,
        }
    }

    /// Last known scroll position; zero outside of `Success`.
    pub fn scroll_position(&self) -> ScrollPosition {
        match self {
            UiState::Success(success) => success.scroll_position(),
            _ => ScrollPosition::ZERO,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> UiState<U> {
        match self {
            UiState::Initial => UiState::Initial,
            UiState::Loading => UiState::Loading,
            UiState::Success(success) => UiState::Success(success.map(f)),
            UiState::Empty => UiState::Empty,
            UiState::Error(error) => UiState::Error(error),
        }
    }

    pub fn is_initial(&self) -> bool {
        matches!(self, UiState::Initial)
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, UiState::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, UiState::Success(_))
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, UiState::Empty)
    }

    pub fn is_error(&self) -> bool {
        matches!(self, UiState::Error(_))
    }
}

impl<T> Default for UiState<T> {
    fn default() -> Self {
        UiState::Initial
    }
}
