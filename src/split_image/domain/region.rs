use crate::domain::error::DomainError;

// 行の半開区間 [start, end)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    start: u32,
    end: u32,
}

impl Region {
    pub fn new(start: u32, end: u32, height: u32) -> Result<Self, DomainError> {
        if start >= end || end > height {
            return Err(DomainError::InvalidInput(format!(
                "row range [{}, {}) is not a non-empty range within height {}",
                start, end, height
            )));
        }
        Ok(Self { start, end })
    }

    // 奇数の高さでは下半分が1行多くなる
    pub fn halves(height: u32) -> Result<(Self, Self), DomainError> {
        if height < 2 {
            return Err(DomainError::DegenerateSplit { height });
        }
        let mid = height / 2;
        Ok((Self::new(0, mid, height)?, Self::new(mid, height, height)?))
    }

    pub fn start(&self) -> u32 {
        self.start
    }

    pub fn end(&self) -> u32 {
        self.end
    }

    pub fn rows(&self) -> u32 {
        self.end - self.start
    }
}
