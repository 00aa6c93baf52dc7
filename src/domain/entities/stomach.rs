/// Victims of the `eat` command, in the order they were eaten.
///
/// Lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct StomachState {
    contents: Vec<String>,
}

impl StomachState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn eat(&mut self, victim: impl Into<String>) {
        self.contents.push(victim.into());
    }

    /// Removes the earliest occurrence of `victim`. Returns false if absent.
    pub fn spit(&mut self, victim: &str) -> bool {
        match self.contents.iter().position(|v| v == victim) {
            Some(idx) => {
                self.contents.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Empties the stomach, returning what was in it
    pub fn vomit(&mut self) -> Vec<String> {
        std::mem::take(&mut self.contents)
    }

    pub fn contents(&self) -> &[String] {
        &self.contents
    }

    pub fn is_empty(&self) -> bool {
        self.contents.is_empty()
    }
}
