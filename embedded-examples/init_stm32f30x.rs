//! Full example code for setting up an ST7789 display. This runs on an STM32F303RE, using a
//! 240x280 TFT module connected to SPI1, PA4 for /CS, PA8 for D/C, and PA9 for /RESET.

#![deny(unsafe_code)]
#![no_main]
#![no_std]

extern crate cortex_m;
extern crate embedded_hal as hal_api;
extern crate stm32f30x;
extern crate stm32f30x_hal as hal;
#[macro_use]
extern crate cortex_m_rt;
extern crate panic_abort;
extern crate st7789;

use cortex_m::asm;
use cortex_m_rt::ExceptionFrame;
use hal::prelude::*;
use hal::spi;
use st7789 as tft;

entry!(main);

exception!(*, default_handler);
exception!(HardFault, hard_fault);

fn hard_fault(_ef: &ExceptionFrame) -> ! {
    asm::bkpt();
    loop {}
}

fn default_handler(_irqn: i16) {
    loop {}
}

fn main() -> ! {
    // Get peripherals and set up RCC.
    let cp = cortex_m::Peripherals::take().unwrap();
    let dp = stm32f30x::Peripherals::take().unwrap();

    let mut flash = dp.FLASH.constrain();
    let mut rcc = dp.RCC.constrain();
    let clocks = rcc.cfgr.freeze(&mut flash.acr);
    let mut delay = hal::delay::Delay::new(cp.SYST, clocks);

    // Get GPIO A where the display is connected.
    let mut gpioa = dp.GPIOA.split(&mut rcc.ahb);

    // Set up SPI1, which is Alternate Function 5 for GPIOs PA5,6,7. The ST7789 samples on the
    // second edge with the clock idling high (SPI mode 3).
    let disp_sck = gpioa.pa5.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let disp_miso = gpioa.pa6.into_af5(&mut gpioa.moder, &mut gpioa.afrl);
    let disp_mosi = gpioa.pa7.into_af5(&mut gpioa.moder, &mut gpioa.afrl);

    let disp_spi = spi::Spi::spi1(
        dp.SPI1,
        (disp_sck, disp_miso, disp_mosi),
        hal_api::spi::Mode {
            polarity: hal_api::spi::Polarity::IdleHigh,
            phase: hal_api::spi::Phase::CaptureOnSecondTransition,
        },
        8.mhz(),
        clocks,
        &mut rcc.apb2,
    );

    // PA4 is the display's active-low chip select.
    let disp_cs = gpioa
        .pa4
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // PA8 will be the D/C push-pull output for the 4th wire.
    let disp_dc = gpioa
        .pa8
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // PA9 is the display's /RESET pin. The st7789 library does not control this pin; we will
    // assert reset separately.
    let mut disp_rst = gpioa
        .pa9
        .into_push_pull_output(&mut gpioa.moder, &mut gpioa.otyper);

    // Create the SpiInterface and Display. This is a 240x280 module, whose glass is wired to
    // the controller RAM starting at row 20.
    let mut disp = tft::Display::new(
        tft::SpiInterface::new(disp_spi, disp_dc, disp_cs),
        tft::PixelCoord(240, 280),
        tft::PixelCoord(0, 20),
    );

    // Assert the display's /RESET for 10ms, then give the controller time to come up.
    disp_rst.set_low().unwrap();
    delay.delay_ms(10_u16);
    disp_rst.set_high().unwrap();
    delay.delay_ms(120_u16);

    // Initialize the display. IPS modules like this one are wired with inverted polarity, so
    // inversion must be enabled for colors to come out right.
    disp.init(tft::Config::new(true), &mut delay).unwrap();

    // Clear the screen and draw a few things with the built-in rasterizer.
    disp.fill_screen(tft::Rgb565::BLACK).unwrap();
    disp.draw_round_rect(10, 10, 220, 120, 8, tft::Rgb565::CYAN)
        .unwrap();
    disp.draw_line(10, 260, 229, 150, tft::Rgb565::RED).unwrap();
    disp.fill_circle(120, 200, 30, tft::Rgb565::YELLOW).unwrap();

    // Blit pre-rendered image data through a region covering part of the display.
    {
        let mut region = disp
            .region(tft::PixelCoord(20, 20), tft::PixelCoord(100, 60))
            .unwrap();
        let pixels = [tft::Rgb565::ORANGE; 80 * 40];
        region.draw(&pixels).unwrap();
    }

    loop {
        asm::wfi();
    }
}
