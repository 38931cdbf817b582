/// Policy for reads that fall outside a 1D signal or an image edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BorderMode<T> {
    Clamp,
    /// Outside reads yield the given value; for alpha this is "transparent".
    Constant(T),
    /// Mirror around the edge element without repeating it (`dcb|abcd|cba`).
    Reflect101,
}

impl<T: Copy> BorderMode<T> {
    /// Maps a possibly out-of-range index into `[0, len)`.
    ///
    /// Returns `None` when the read should use the constant fill instead, and
    /// always for `len == 0`.
    pub fn resolve(&self, i: isize, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        if (0..len as isize).contains(&i) {
            return Some(i as usize);
        }

        match self {
            Self::Constant(_) => None,
            Self::Clamp => Some(if i < 0 { 0 } else { len - 1 }),
            Self::Reflect101 if len == 1 => Some(0),
            Self::Reflect101 => {
                let period = 2 * (len as isize - 1);
                let r = i.rem_euclid(period) as usize;
                Some(if r < len { r } else { 2 * (len - 1) - r })
            }
        }
    }

    /// Reads `signal[i]` under this policy.
    pub fn read(&self, signal: &[T], i: isize) -> Option<T> {
        match self.resolve(i, signal.len()) {
            Some(idx) => Some(signal[idx]),
            None => match self {
                Self::Constant(v) => Some(*v),
                _ => None,
            },
        }
    }
}
