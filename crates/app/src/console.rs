use std::io::{self, BufRead, Write};

/// What the learner chose for the word on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Known,
    Review,
    Quit,
}

impl Decision {
    fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "k" | "known" => Some(Self::Known),
            "r" | "review" => Some(Self::Review),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Line-oriented prompt over any reader/writer pair.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn say(&mut self, text: impl AsRef<str>) -> io::Result<()> {
        writeln!(self.output, "{}", text.as_ref())
    }

    /// Print `prompt` and read one line. `None` means end of input.
    pub fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    /// Yes/no question. Anything but `y`/`yes` (including end of input) is no.
    pub fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let answer = self.ask(&format!("{question} [y/N] "))?;
        Ok(matches!(
            answer.map(|a| a.to_ascii_lowercase()).as_deref(),
            Some("y" | "yes")
        ))
    }

    /// Keep asking until a valid decision arrives. End of input quits.
    pub fn decide(&mut self) -> io::Result<Decision> {
        loop {
            let Some(answer) = self.ask("[k] known  [r] review  [q] quit > ")? else {
                return Ok(Decision::Quit);
            };
            match Decision::parse(&answer) {
                Some(decision) => return Ok(decision),
                None => self.say("Please answer k, r, or q.")?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn console(input: &str) -> Console<&[u8], Vec<u8>> {
        Console::new(input.as_bytes(), Vec::new())
    }

    #[test]
    fn decide_retries_until_valid() {
        let mut c = console("x\n\nR\n");
        assert_eq!(c.decide().unwrap(), Decision::Review);
        let shown = String::from_utf8(c.output).unwrap();
        assert_eq!(shown.matches("Please answer").count(), 2);
    }

    #[test]
    fn end_of_input_quits() {
        let mut c = console("");
        assert_eq!(c.decide().unwrap(), Decision::Quit);
        assert!(!c.confirm("Sure?").unwrap());
    }

    #[test]
    fn confirm_accepts_only_yes() {
        let mut c = console("y\nYES\nn\nmaybe\n");
        assert!(c.confirm("a").unwrap());
        assert!(c.confirm("b").unwrap());
        assert!(!c.confirm("c").unwrap());
        assert!(!c.confirm("d").unwrap());
    }
}
