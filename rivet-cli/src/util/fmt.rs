use std::{fmt, time::Duration};

#[derive(Clone, Copy, Debug)]
pub struct Elapsed(pub Duration);

impl fmt::Display for Elapsed {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let secs = self.0.as_secs();
        if secs >= 60 {
            write!(f, "{}m {:02}s", secs / 60, secs % 60)
        } else {
            write!(f, "{}.{:02}s", secs, self.0.subsec_nanos() / 10_000_000)
        }
    }
}

/// `1 file`, `2 files`
#[derive(Clone, Copy, Debug)]
pub struct Count(pub usize, pub &'static str);

impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let Self(n, noun) = *self;
        if n == 1 {
            write!(f, "{n} {noun}")
        } else {
            write!(f, "{n} {noun}s")
        }
    }
}
