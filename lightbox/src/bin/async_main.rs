//! Microphone in, light levels out.
//!
//! The following wiring is assumed:
//! - INMP441 BCLK => GPIO4
//! - INMP441 WS   => GPIO5
//! - INMP441 DIN  => GPIO6
//! - Light controller RX <= GPIO17 (UART1 TX)

#![no_std]
#![no_main]

use defmt::{error, info, Debug2Format, Display2Format};
use defmt_rtt as _;
use embassy_executor::{task, Spawner};
use embassy_time::Instant;
use esp_backtrace as _;
use esp_hal::{
    clock::CpuClock,
    dma_buffers,
    i2s::master::{DataFormat, I2s, Standard},
    time::Rate,
    timer::timg::TimerGroup,
    uart::{self, Uart},
};
use light_engine::{Engine, EngineConfig, RealFft};
use static_cell::StaticCell;

use lightbox::config::*;
use lightbox::inmp441::{microphone_reader, FrameSignal, PcmFrame};
use lightbox::uart_sink::UartSink;

type LightEngine = Engine<FRAME_LEN, CHANNELS>;

static FRAME_SIGNAL: StaticCell<FrameSignal> = StaticCell::new();

/// Macro to create static variables
macro_rules! mk_static {
    ($t:ty,$val:expr) => {{
        static STATIC_CELL: static_cell::StaticCell<$t> = static_cell::StaticCell::new();
        #[deny(unused_attributes)]
        let x = STATIC_CELL.uninit().write(($val));
        x
    }};
}

#[task]
async fn light_task(
    engine: &'static mut LightEngine,
    signal: &'static FrameSignal,
    mut sink: UartSink,
) {
    info!("light_task: starting!");

    let mut state = engine.initial_state();
    let mut fft = RealFft;
    let mut count = 0u32;
    let mut start = Instant::now();

    loop {
        let samples = signal.wait().await;
        let mut source = PcmFrame::new(&samples);

        let report = match engine.run_frame(&mut state, &mut source, &mut fft, &mut sink) {
            Ok(report) => report,
            Err(e) => {
                error!("light pipeline failed: {}", Debug2Format(&e));
                panic!("light pipeline failed");
            }
        };

        count += 1;
        if start.elapsed() > FPS_INTERVAL {
            info!(
                "{} frames/s, {} degenerate channels, levels {:?}",
                count,
                report.degenerate_count(),
                report.levels
            );
            count = 0;
            start = Instant::now();
        }
    }
}

#[esp_hal_embassy::main]
async fn main(spawner: Spawner) {
    info!("Init!");

    let peripherals = esp_hal::init(esp_hal::Config::default().with_cpu_clock(CpuClock::max()));

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_hal_embassy::init(timg0.timer0);

    let engine = match LightEngine::new(EngineConfig::reference()) {
        Ok(engine) => mk_static!(LightEngine, engine),
        Err(e) => {
            error!("invalid engine configuration: {}", Display2Format(&e));
            panic!("invalid engine configuration");
        }
    };

    let uart = match Uart::new(
        peripherals.UART1,
        uart::Config::default().with_baudrate(UART_BAUD),
    ) {
        Ok(uart) => uart.with_tx(peripherals.GPIO17).with_rx(peripherals.GPIO18),
        Err(e) => {
            error!("UART configuration failed: {:?}", e);
            panic!("UART configuration failed");
        }
    };
    info!("UART1 at {} baud", UART_BAUD);

    let (rx_buffer, rx_descriptors, _, tx_descriptors) = dma_buffers!(DMA_BUFFER_SIZE, 0);

    let i2s = I2s::new(
        peripherals.I2S0,
        Standard::Philips,
        DataFormat::Data16Channel16,
        Rate::from_hz(SAMPLE_RATE_HZ),
        peripherals.DMA_CH0,
        rx_descriptors,
        tx_descriptors,
    )
    .into_async();

    let i2s_rx = i2s
        .i2s_rx
        .with_bclk(peripherals.GPIO4)
        .with_ws(peripherals.GPIO5)
        .with_din(peripherals.GPIO6)
        .build();
    info!("I2S at {} Hz, {}-sample frames", SAMPLE_RATE_HZ, FRAME_LEN);

    let frame_signal = &*FRAME_SIGNAL.init(FrameSignal::new());

    spawner.must_spawn(microphone_reader(i2s_rx, rx_buffer, frame_signal));
    spawner.must_spawn(light_task(engine, frame_signal, UartSink::new(uart)));
}
