use embassy_time::Duration;

// --- Audio Config ---
pub const SAMPLE_RATE_HZ: u32 = 44_100; // I2S sample rate of the INMP441
pub const FRAME_LEN: usize = 2048; // Samples per analysis frame
pub const DMA_BUFFER_SIZE: usize = 4096 * 3;

// --- Light Config ---
pub const CHANNELS: usize = 8;
pub const UART_BAUD: u32 = 115_200;

// --- Pins ---
// BCLK => GPIO4, WS => GPIO5, DIN => GPIO6, UART TX => GPIO17, UART RX => GPIO18

// --- Task Timing ---
pub const FPS_INTERVAL: Duration = Duration::from_secs(1);
