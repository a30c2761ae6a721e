use std::io::{BufRead, Write};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Proceed,
    Declined,
    /// Input closed or unreadable before an answer arrived.
    Interrupted,
}

/// Only an explicit `y` proceeds.
pub fn ask(prompt: &str, input: &mut dyn BufRead, out: &mut dyn Write) -> Confirmation {
    if write!(out, "{prompt}").and_then(|_| out.flush()).is_err() {
        return Confirmation::Interrupted;
    }
    let mut answer = String::new();
    match input.read_line(&mut answer) {
        Ok(0) | Err(_) => Confirmation::Interrupted,
        Ok(_) if answer.trim().eq_ignore_ascii_case("y") => Confirmation::Proceed,
        Ok(_) => Confirmation::Declined,
    }
}
