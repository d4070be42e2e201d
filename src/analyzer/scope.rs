use std::collections::HashMap;

/// One lexical frame: identifier -> initialized flag.
#[derive(Debug, Default, Clone)]
pub struct Scope {
    symbols: HashMap<String, bool>,
}

impl Scope {
    /// Returns `false` if the name is already declared in this frame.
    pub fn declare(&mut self, name: &str) -> bool {
        if self.symbols.contains_key(name) {
            return false;
        }
        self.symbols.insert(name.to_string(), false);
        true
    }

    pub fn get(&self, name: &str) -> Option<bool> {
        self.symbols.get(name).copied()
    }

    fn initialize(&mut self, name: &str) -> bool {
        match self.symbols.get_mut(name) {
            Some(initialized) => {
                *initialized = true;
                true
            }
            None => false,
        }
    }
}

/// Where a name resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// Index of the frame holding the name; 0 is the global frame.
    pub depth: usize,
    pub initialized: bool,
}

impl Resolution {
    pub fn is_global(&self) -> bool {
        self.depth == 0
    }
}

/// Stack of frames, innermost last. The global frame is never popped.
#[derive(Debug, Clone)]
pub struct ScopeStack {
    frames: Vec<Scope>,
}

impl Default for ScopeStack {
    fn default() -> Self {
        Self::new()
    }
}

impl ScopeStack {
    pub fn new() -> Self {
        ScopeStack {
            frames: vec![Scope::default()],
        }
    }

    pub fn enter(&mut self) {
        self.frames.push(Scope::default());
    }

    pub fn exit(&mut self) {
        if self.frames.len() > 1 {
            self.frames.pop();
        }
    }

    /// Number of frames, including the global one.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Declares `name` in the innermost frame.
    pub fn declare(&mut self, name: &str) -> bool {
        let depth = self.frames.len() - 1;
        self.frames[depth].declare(name)
    }

    /// Looks a name up from the innermost frame outwards.
    pub fn resolve(&self, name: &str) -> Option<Resolution> {
        self.frames
            .iter()
            .enumerate()
            .rev()
            .find_map(|(depth, scope)| {
                scope.get(name).map(|initialized| Resolution { depth, initialized })
            })
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Whether `name` is declared in the global frame, where only functions live.
    pub fn is_function(&self, name: &str) -> bool {
        self.frames[0].get(name).is_some()
    }

    pub fn is_initialized(&self, name: &str) -> bool {
        self.resolve(name).is_some_and(|resolution| resolution.initialized)
    }

    /// Marks the innermost declaration of `name` as initialized.
    pub fn initialize(&mut self, name: &str) {
        for scope in self.frames.iter_mut().rev() {
            if scope.initialize(name) {
                return;
            }
        }
    }
}
