/// Completion status of a bus transaction, decoded from the transport's
/// numeric result code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Success,
    /// Payload exceeded the transport's transmit buffer
    DataTooLong,
    /// The address byte was not acknowledged
    AddressNack,
    /// A data byte was not acknowledged
    DataNack,
    /// The transport timed out
    Timeout,
    /// Any other transport-specific failure, carrying the raw code
    Other(u8),
}

impl Status {
    /// Decodes a transport result code
    pub fn from_code(code: u8) -> Self {
        match code {
            0 => Status::Success,
            1 => Status::DataTooLong,
            2 => Status::AddressNack,
            3 => Status::DataNack,
            5 => Status::Timeout,
            code => Status::Other(code),
        }
    }

    /// Returns the raw transport result code
    pub fn code(self) -> u8 {
        match self {
            Status::Success => 0,
            Status::DataTooLong => 1,
            Status::AddressNack => 2,
            Status::DataNack => 3,
            Status::Timeout => 5,
            Status::Other(code) => code,
        }
    }

    pub fn is_ok(self) -> bool {
        self == Status::Success
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip() {
        for code in 0..=7 {
            assert_eq!(Status::from_code(code).code(), code);
        }
        assert!(Status::from_code(0).is_ok());
        assert!(!Status::from_code(4).is_ok());
        assert_eq!(Status::from_code(4), Status::Other(4));
    }
}
