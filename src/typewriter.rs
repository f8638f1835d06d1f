//! Character-by-character typing and erasing of a rotating list of phrases.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Typing,
    PausingFull,
    Erasing,
    PausingEmpty,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Timing {
    pub type_delay_ms: u32,
    pub full_pause_ms: u32,
    pub erase_delay_ms: u32,
    pub empty_pause_ms: u32,
}

/// One scheduler tick: the text to display (if it changed) and the wait before the next tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    pub text: Option<String>,
    pub delay_ms: u32,
}

#[derive(Clone, Debug)]
pub struct Typewriter {
    phrases: Vec<Vec<char>>,
    index: usize,
    cursor: usize,
    phase: Phase,
    timing: Timing,
}

impl Typewriter {
    /// Returns `None` when there is nothing to type.
    pub fn new<S: AsRef<str>>(phrases: &[S], timing: Timing) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }

        Some(Self {
            phrases: phrases.iter().map(|phrase| phrase.as_ref().chars().collect()).collect(),
            index: 0,
            cursor: 0,
            phase: Phase::Typing,
            timing,
        })
    }

    #[cfg(test)]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[cfg(test)]
    pub fn phrase_index(&self) -> usize {
        self.index
    }

    fn current(&self) -> &[char] {
        &self.phrases[self.index]
    }

    fn visible(&self) -> String {
        self.current()[..self.cursor].iter().collect()
    }

    pub fn step(&mut self) -> Frame {
        match self.phase {
            Phase::Typing => {
                let text = self.visible();
                if self.cursor >= self.current().len() {
                    self.phase = Phase::PausingFull;
                } else {
                    self.cursor += 1;
                }
                Frame {
                    text: Some(text),
                    delay_ms: self.timing.type_delay_ms,
                }
            }
            Phase::PausingFull => {
                self.phase = Phase::Erasing;
                Frame {
                    text: None,
                    delay_ms: self.timing.full_pause_ms,
                }
            }
            Phase::Erasing => {
                if self.cursor == 0 {
                    self.phase = Phase::PausingEmpty;
                    return Frame {
                        text: None,
                        delay_ms: self.timing.erase_delay_ms,
                    };
                }

                self.cursor -= 1;
                if self.cursor == 0 {
                    self.phase = Phase::PausingEmpty;
                }
                Frame {
                    text: Some(self.visible()),
                    delay_ms: self.timing.erase_delay_ms,
                }
            }
            Phase::PausingEmpty => {
                self.index = (self.index + 1) % self.phrases.len();
                self.cursor = 0;
                self.phase = Phase::Typing;
                Frame {
                    text: None,
                    delay_ms: self.timing.empty_pause_ms,
                }
            }
        }
    }
}
