use esp_hal::{uart::Uart, Blocking};
use light_engine::{LightMessage, LightSink};

/// Light controller on the other end of a UART.
pub struct UartSink {
    uart: Uart<'static, Blocking>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum UartSinkError {
    /// The driver rejected the write.
    Tx,
    /// Fewer bytes went out than the message holds.
    Incomplete { written: usize },
}

impl UartSink {
    pub fn new(uart: Uart<'static, Blocking>) -> Self {
        Self { uart }
    }
}

impl LightSink for UartSink {
    type Error = UartSinkError;

    fn send(&mut self, message: LightMessage) -> Result<(), Self::Error> {
        let bytes = message.to_bytes();
        let written = self
            .uart
            .write_bytes(&bytes)
            .map_err(|_| UartSinkError::Tx)?;
        if written != bytes.len() {
            return Err(UartSinkError::Incomplete { written });
        }
        Ok(())
    }
}
