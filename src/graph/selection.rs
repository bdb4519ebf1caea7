//! Axis selection cursor.
//!
//! Tracks which slot (cast, X or Y) the next list click fills. After a cast
//! click the target is X; variable clicks then alternate X, Y, X, Y, ...

/// The slot the next click will populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CursorMode {
    /// Nothing selected yet; a variable click fills X.
    #[default]
    AwaitingCast,
    /// Next variable click fills X.
    AwaitingX,
    /// Next variable click fills Y.
    AwaitingY,
}

/// Field that should hold the input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Cast list.
    Cast,
    /// X variable field.
    X,
    /// Y variable field.
    Y,
}

impl Field {
    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Field::Cast => "Cast",
            Field::X => "X",
            Field::Y => "Y",
        }
    }
}

/// Two-slot (X, Y) selection cursor plus the selected cast.
#[derive(Debug, Clone, Default)]
pub struct SelectionCursor {
    mode: CursorMode,
    cast: Option<String>,
    x: Option<String>,
    y: Option<String>,
}

impl SelectionCursor {
    /// Create an empty cursor awaiting a cast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Select a cast. The next variable click fills X.
    pub fn select_cast(&mut self, cast: impl Into<String>) {
        self.cast = Some(cast.into());
        self.mode = CursorMode::AwaitingX;
    }

    /// Fill the current target slot with a variable and advance.
    ///
    /// An empty name is ignored.
    pub fn select_variable(&mut self, name: impl Into<String>) {
        let name = name.into();
        if name.is_empty() {
            return;
        }

        match self.mode {
            CursorMode::AwaitingCast | CursorMode::AwaitingX => {
                self.x = Some(name);
                self.mode = CursorMode::AwaitingY;
            },
            CursorMode::AwaitingY => {
                self.y = Some(name);
                self.mode = CursorMode::AwaitingX;
            },
        }
    }

    /// Select the variable at `row` of `variables`. Out-of-range rows are a no-op.
    pub fn select_variable_row(&mut self, variables: &[String], row: usize) -> bool {
        match variables.get(row) {
            Some(name) => {
                self.select_variable(name.clone());
                true
            },
            None => false,
        }
    }

    /// Current mode.
    pub fn mode(&self) -> CursorMode {
        self.mode
    }

    /// Field that should receive focus after the last fill.
    pub fn focus(&self) -> Field {
        match self.mode {
            CursorMode::AwaitingCast => Field::Cast,
            CursorMode::AwaitingX => Field::X,
            CursorMode::AwaitingY => Field::Y,
        }
    }

    /// Selected cast.
    pub fn cast(&self) -> Option<&str> {
        self.cast.as_deref()
    }

    /// Selected X variable.
    pub fn x(&self) -> Option<&str> {
        self.x.as_deref()
    }

    /// Selected Y variable.
    pub fn y(&self) -> Option<&str> {
        self.y.as_deref()
    }

    /// Both axes, if both are selected.
    pub fn axes(&self) -> Option<(&str, &str)> {
        Some((self.x()?, self.y()?))
    }
}
