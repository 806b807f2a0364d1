// cvar.rs — dynamic variable tracking

use std::collections::HashMap;

use parking_lot::Mutex;

pub const CVAR_ARCHIVE: i32 = 1; // saved to config
pub const CVAR_NOSET: i32 = 8;   // command-line only

/// A console variable.
#[derive(Clone)]
pub struct Cvar {
    pub name: String,
    pub string: String,
    pub flags: i32,
    pub modified: bool,
    pub value: f32,
}

/// The full cvar system context.
pub struct CvarContext {
    pub cvar_vars: Vec<Cvar>,
    /// O(1) cvar lookup by name -> index in cvar_vars
    cvar_index: HashMap<String, usize>,
}

impl Default for CvarContext {
    fn default() -> Self {
        Self::new()
    }
}

impl CvarContext {
    pub fn new() -> Self {
        Self {
            cvar_vars: Vec::new(),
            cvar_index: HashMap::new(),
        }
    }

    pub fn find_var(&self, name: &str) -> Option<&Cvar> {
        self.cvar_index.get(name).map(|&idx| &self.cvar_vars[idx])
    }

    pub fn find_var_mut(&mut self, name: &str) -> Option<&mut Cvar> {
        if let Some(&idx) = self.cvar_index.get(name) {
            Some(&mut self.cvar_vars[idx])
        } else {
            None
        }
    }

    /// Register a cvar if it doesn't exist, or return the existing one.
    /// Flags are OR'd into an existing cvar.
    pub fn get(&mut self, name: &str, value: &str, flags: i32) -> usize {
        if let Some(&idx) = self.cvar_index.get(name) {
            self.cvar_vars[idx].flags |= flags;
            return idx;
        }

        let var = Cvar {
            name: name.to_string(),
            string: value.to_string(),
            flags,
            modified: true,
            value: value.parse().unwrap_or(0.0),
        };
        let idx = self.cvar_vars.len();
        self.cvar_vars.push(var);
        self.cvar_index.insert(name.to_string(), idx);
        idx
    }

    pub fn set(&mut self, name: &str, value: &str) {
        if self.find_var(name).is_none() {
            // create it
            self.get(name, value, 0);
            return;
        }
        let var = self.find_var_mut(name).unwrap();
        if var.flags & CVAR_NOSET != 0 {
            return;
        }
        if var.string == value {
            return;
        }
        var.string = value.to_string();
        var.value = value.parse().unwrap_or(0.0);
        var.modified = true;
    }

    pub fn set_value(&mut self, name: &str, value: f32) {
        // integral values print without a trailing .0, matching console output
        let s = if value == value.trunc() {
            format!("{}", value as i32)
        } else {
            format!("{}", value)
        };
        self.set(name, &s);
    }

    pub fn variable_value(&self, name: &str) -> f32 {
        self.find_var(name).map_or(0.0, |v| v.value)
    }

    pub fn variable_string(&self, name: &str) -> &str {
        self.find_var(name).map_or("", |v| v.string.as_str())
    }
}

// ============================================================
// Global singleton and free-function wrappers
// ============================================================

static CVAR_CTX: Mutex<Option<CvarContext>> = Mutex::new(None);

pub fn cvar_init() {
    let mut g = CVAR_CTX.lock();
    *g = Some(CvarContext::new());
}

pub fn cvar_shutdown() {
    let mut g = CVAR_CTX.lock();
    *g = None;
}

pub fn cvar_get(name: &str, value: &str, flags: i32) -> Option<usize> {
    CVAR_CTX.lock().as_mut().map(|c| c.get(name, value, flags))
}

pub fn cvar_set(name: &str, value: &str) {
    if let Some(ref mut c) = *CVAR_CTX.lock() {
        c.set(name, value);
    }
}

pub fn cvar_set_value(name: &str, value: f32) {
    if let Some(ref mut c) = *CVAR_CTX.lock() {
        c.set_value(name, value);
    }
}

pub fn cvar_variable_value(name: &str) -> f32 {
    CVAR_CTX.lock().as_ref().map_or(0.0, |c| c.variable_value(name))
}

pub fn cvar_variable_string(name: &str) -> String {
    CVAR_CTX
        .lock()
        .as_ref()
        .map_or(String::new(), |c| c.variable_string(name).to_string())
}

// ============================================================
// Tests
// ============================================================
