#![no_std]
#![no_main]

use core::fmt::{Display, Write as _};

use defmt::{error, info, warn};
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::gpio::{Level, Output};
use embassy_rp::peripherals::UART1;
use embassy_rp::uart::{Async, Config as UartConfig, Uart, UartTx};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Delay;
use heapless::String;
use selector_core::report::TokenLine;
use sp3t_router_rp2040::{
    decode, latch_config, CommandLine, HalDriver, LineError, PinId, RoutingController,
    UartCommandSource,
};
use static_cell::StaticCell;

#[cfg(feature = "dev-panic")]
use panic_probe as _;
#[cfg(feature = "prod-panic")]
use panic_reset as _;

bind_interrupts!(struct Irqs {
    UART1_IRQ => embassy_rp::uart::InterruptHandler<UART1>;
});

type Router = RoutingController<HalDriver<Output<'static>, Delay>>;
type Received = Result<CommandLine, LineError>;

/// Commands waiting to be latched, in arrival order.
static COMMANDS: StaticCell<Channel<CriticalSectionRawMutex, Received, 4>> = StaticCell::new();

/// One reply line including `\r\n`.
type Reply = String<96>;

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("SP3T router starting...");

    let p = embassy_rp::init(embassy_rp::config::Config::default());

    let commands = COMMANDS.init(Channel::new());

    // --- UART Setup ---
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = 115_200;

    let uart = Uart::new(
        p.UART1,
        p.PIN_8, // TX
        p.PIN_9, // RX
        Irqs,
        p.DMA_CH0,
        p.DMA_CH1,
        uart_config,
    );
    let (tx, rx) = uart.split();
    let input = UartCommandSource::new(rx);

    // --- Selector Setup ---
    // Pin numbers must match board::SELECTOR_PINS, LATCH_PINS and OUTPUT_ENABLE_PIN
    let selectors = [
        [Output::new(p.PIN_2, Level::Low), Output::new(p.PIN_3, Level::Low)],
        [Output::new(p.PIN_4, Level::Low), Output::new(p.PIN_5, Level::Low)],
        [Output::new(p.PIN_6, Level::Low), Output::new(p.PIN_7, Level::Low)],
        [Output::new(p.PIN_10, Level::Low), Output::new(p.PIN_11, Level::Low)],
    ];
    let lines = [
        (PinId(12), Output::new(p.PIN_12, Level::Low)),
        (PinId(13), Output::new(p.PIN_13, Level::Low)),
        (PinId(14), Output::new(p.PIN_14, Level::Low)),
        (PinId(15), Output::new(p.PIN_15, Level::Low)),
        (PinId(16), Output::new(p.PIN_16, Level::Low)),
    ];

    let mut driver = HalDriver::new(selectors, Delay);
    for (id, pin) in lines {
        if driver.add_line(id, pin).is_err() {
            error!("Control line {} rejected", id);
        }
    }

    let mut router = RoutingController::new(driver, latch_config());
    if let Err(e) = router.sequencer_mut().float_all() {
        error!("Boot float failed: {}", e);
    }

    // LED for error indication (on-board LED on Pico)
    let led = Output::new(p.PIN_25, Level::Low);

    spawner.spawn(input_task(input, commands).unwrap());
    spawner.spawn(router_task(router, commands, tx, led).unwrap());

    info!("SP3T router initialized, waiting for commands...");
}

/// Input task - reads UART lines and queues them for the router.
#[embassy_executor::task]
async fn input_task(
    mut input: UartCommandSource<'static>,
    commands: &'static Channel<CriticalSectionRawMutex, Received, 4>,
) {
    loop {
        let received = input.receive().await;
        // Backpressure: the UART waits while the router is latching
        commands.send(received).await;
    }
}

/// Router task - decodes each command, latches it and replies over UART.
#[embassy_executor::task]
async fn router_task(
    mut router: Router,
    commands: &'static Channel<CriticalSectionRawMutex, Received, 4>,
    mut tx: UartTx<'static, Async>,
    mut led: Output<'static>,
) {
    loop {
        let line = match commands.receive().await {
            Ok(line) => line,
            Err(e) => {
                error!("Input error: {:?}", e);
                send(&mut tx, &reply(e)).await;
                led.toggle();
                continue;
            }
        };

        let decoded = match decode(&line) {
            Ok(decoded) => decoded,
            Err(e) => {
                warn!("Rejected command: {}", e);
                send(&mut tx, &reply(e)).await;
                led.toggle();
                continue;
            }
        };

        for token in decoded.tokens() {
            send(&mut tx, &reply(TokenLine(token))).await;
        }

        match router.execute(&decoded) {
            Ok(latched) => info!(
                "{} channels latched across {} groups",
                latched.channels,
                latched.groups.len()
            ),
            Err(e) => {
                error!("Sequencing aborted: {}", e);
                send(&mut tx, &reply(Prefixed("error: ", e))).await;
            }
        }
    }
}

struct Prefixed<T>(&'static str, T);

impl<T: Display> Display for Prefixed<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}{}", self.0, self.1)
    }
}

fn reply(line: impl Display) -> Reply {
    let mut text = Reply::new();
    if write!(text, "{line}\r\n").is_err() {
        warn!("Reply truncated");
    }
    text
}

async fn send(tx: &mut UartTx<'static, Async>, text: &Reply) {
    if let Err(e) = tx.write(text.as_bytes()).await {
        error!("Reply failed: {:?}", e);
    }
}
