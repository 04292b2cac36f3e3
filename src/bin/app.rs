#![no_std]
#![no_main]

use boardtest_core::{
    app::{BoardParts, BoardUsecases, ConfigurationUsecases},
    domain::settings::{BoardSettings, SETTINGS_SIZE},
};
use embassy_executor::Spawner;
use embassy_time::{Instant, Timer};
use esp_alloc as _;
use esp_backtrace as _;
use esp_hal::{
    clock::CpuClock,
    gpio::{Input, InputConfig, Level, Output, OutputConfig, Pull},
    timer::timg::TimerGroup,
};
use esp_storage::FlashStorage;
use log::{error, info, warn};

use esp_boardtest::config::{BUILD_VERSION, FIRMWARE_NAME, LOOP_PERIOD};
use esp_boardtest::controllers::{PortalHttpController, init_controllers};
use esp_boardtest::infrastructure::drivers::{
    EspBoard,
    EspDht22,
    EspFlashStorageDriver,
    EspLightSensor,
    EspRandom,
    EspRgbLed,
    IrReceiver,
    SettingsStorage,
    init_ir_input,
    init_lcd,
    init_wifi,
    ir_capture_task,
};
use esp_boardtest::infrastructure::services::{
    BoardSnapshot,
    BoardStateService,
    ProvisioningService,
    get_provisioning_receiver,
    get_settings_receiver,
    init_settings,
};
use esp_boardtest::infrastructure::tasks::{
    dhcp_server_task,
    captive_dns_task,
    http_server_task,
    persistence_task,
    provisioning_task,
};
use esp_boardtest::{
    button_gpio,
    dht_gpio,
    ir_gpio,
    lcd_gpio,
    light_sensor_gpio,
    mk_static,
    red_led_gpio,
    rgb_gpio,
};

#[cfg(feature = "internal-led")]
use esp_boardtest::internal_led_gpio;

esp_bootloader_esp_idf::esp_app_desc!();

#[esp_rtos::main]
async fn main(spawner: Spawner) -> ! {
    esp_println::logger::init_logger_from_env();
    info!("startup() ****");
    info!("Hello World!");
    info!("START {} from {}", FIRMWARE_NAME, BUILD_VERSION);

    // Initialize hardware
    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    // Allocate heap memory (64 + 32 KB), the radio needs it
    esp_alloc::heap_allocator!(
        #[unsafe(link_section = ".dram2_uninit")] size: 64 * 1024
    );
    esp_alloc::heap_allocator!(size: 32 * 1024);

    // Start rtos
    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);

    // Settings from flash, defaults when missing or unreadable
    let mut storage = SettingsStorage::new(EspFlashStorageDriver::new(FlashStorage::new(
        peripherals.FLASH,
    )));
    let settings = match storage.load::<SETTINGS_SIZE, BoardSettings>().await {
        Ok(settings) => settings,
        Err(e) => {
            warn!("settings: using defaults ({:?})", e);
            BoardSettings::default()
        }
    };
    let thing_name = settings.thing_name.clone();
    let settings_service = init_settings(settings);
    spawner
        .spawn(persistence_task(storage, get_settings_receiver()))
        .ok();

    // Board peripherals
    let (rs, en, d4, d5, d6, d7) = lcd_gpio!(peripherals);
    let display = init_lcd(rs, en, (d4, d5, d6, d7)).expect("lcd: init sequence");
    let (red, green, blue) = rgb_gpio!(peripherals);
    let rgb = EspRgbLed::new(peripherals.LEDC, red, green, blue);
    let climate = EspDht22::new(dht_gpio!(peripherals));
    let light = EspLightSensor::new(peripherals.ADC1, light_sensor_gpio!(peripherals));
    let button = Input::new(
        button_gpio!(peripherals),
        InputConfig::default().with_pull(Pull::None),
    );
    let red_led = Output::new(red_led_gpio!(peripherals), Level::Low, OutputConfig::default());
    #[cfg(feature = "internal-led")]
    let internal_led = Output::new(
        internal_led_gpio!(peripherals),
        Level::Low,
        OutputConfig::default(),
    );
    #[cfg(not(feature = "internal-led"))]
    let internal_led = boardtest_core::domain::ports::NoLed;
    let ir_channel =
        init_ir_input(peripherals.RMT, ir_gpio!(peripherals)).expect("ir: rmt channel");
    spawner.spawn(ir_capture_task(ir_channel)).ok();

    let board_state = BoardStateService::new(settings_service, ProvisioningService);
    let parts = BoardParts::<EspBoard<_>> {
        display,
        rgb,
        climate,
        light,
        remote: IrReceiver,
        random: EspRandom::new(),
        button,
        red_led,
        internal_led,
        delay: embassy_time::Delay,
    };
    let mut board = BoardUsecases::new(parts, board_state);
    if let Err(e) = board.start() {
        error!("board: start failed: {:?}", e);
    }

    // Portal: radio, provisioning and network services
    let (stacks, controller) = init_wifi(spawner, peripherals.WIFI, &thing_name);
    let (ap_controller, sta_controller) =
        init_controllers(ConfigurationUsecases::new(settings_service), board_state);
    let ap_controller = mk_static!(PortalHttpController, ap_controller);
    let sta_controller = mk_static!(PortalHttpController, sta_controller);

    spawner
        .spawn(provisioning_task(
            controller,
            stacks.sta,
            settings_service,
            get_provisioning_receiver(),
        ))
        .ok();
    spawner.spawn(dhcp_server_task(stacks.ap)).ok();
    spawner.spawn(captive_dns_task(stacks.ap)).ok();
    spawner.spawn(http_server_task(stacks.ap, ap_controller)).ok();
    spawner.spawn(http_server_task(stacks.sta, sta_controller)).ok();

    info!("startup() complete ****");

    loop {
        let now = Instant::now().as_millis();
        if let Err(e) = board.tick(now).await {
            error!("board: loop error: {:?}", e);
        }
        board_state.publish(BoardSnapshot {
            climate: board.climate(),
            light: board.light(),
            color: board.color(),
        });
        Timer::after(LOOP_PERIOD).await;
    }
}
