//! ST7789 SPI panel driver.
//!
//! Blocking-SPI driver for 240x320 ST7789V panels. Fills stream straight
//! through the address window; everything else draws with
//! `embedded-graphics` primitives through the [`DrawTarget`] implementation,
//! which is what the [`Panel`] methods use.

use embassy_rp::gpio::Output;
use embassy_rp::peripherals::SPI0;
use embassy_rp::spi::{Blocking, Spi};
use embassy_time::{block_for, Duration};
use embedded_graphics::mono_font::ascii::{FONT_10X20, FONT_8X13};
use embedded_graphics::mono_font::MonoTextStyleBuilder;
use embedded_graphics::pixelcolor::raw::RawU16;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle,
};
use embedded_graphics::text::{Baseline, Text};

use serigraph_core::panel::{FontId, Panel, PanelError};

/// Panel dimensions (portrait)
pub const WIDTH: u16 = 240;
pub const HEIGHT: u16 = 320;

// ST7789 commands
const SWRESET: u8 = 0x01;
const SLPOUT: u8 = 0x11;
const NORON: u8 = 0x13;
const INVON: u8 = 0x21;
const DISPOFF: u8 = 0x28;
const DISPON: u8 = 0x29;
const CASET: u8 = 0x2A;
const RASET: u8 = 0x2B;
const RAMWR: u8 = 0x2C;
const MADCTL: u8 = 0x36;
const COLMOD: u8 = 0x3A;
const WRDISBV: u8 = 0x51;
const WRCTRLD: u8 = 0x53;
const VCOMS: u8 = 0xBB;

/// Corner radius for the rounded-rectangle commands
const CORNER_RADIUS: u32 = 8;

/// ST7789 panel over blocking SPI
pub struct St7789<'d> {
    spi: Spi<'d, SPI0, Blocking>,
    dc: Output<'d>,
    cs: Output<'d>,
    rst: Output<'d>,
}

impl<'d> St7789<'d> {
    /// Create a driver from SPI and control pins; call
    /// [`Panel::bring_up`] before drawing.
    pub fn new(
        spi: Spi<'d, SPI0, Blocking>,
        dc: Output<'d>,
        cs: Output<'d>,
        rst: Output<'d>,
    ) -> Self {
        Self { spi, dc, cs, rst }
    }

    /// Send a command byte (DC low, CS low during transfer)
    fn command(&mut self, cmd: u8) -> Result<(), PanelError> {
        self.cs.set_low();
        self.dc.set_low();
        let res = self.spi.blocking_write(&[cmd]);
        self.cs.set_high();
        res.map_err(|_| PanelError::Bus)
    }

    /// Send a command byte followed by data bytes
    fn command_data(&mut self, cmd: u8, data: &[u8]) -> Result<(), PanelError> {
        self.cs.set_low();
        self.dc.set_low();
        let mut res = self.spi.blocking_write(&[cmd]);
        if res.is_ok() {
            self.dc.set_high();
            res = self.spi.blocking_write(data);
        }
        self.cs.set_high();
        res.map_err(|_| PanelError::Bus)
    }

    /// Open the address window and start a pixel write.
    ///
    /// Leaves CS low and DC high; the caller streams pixel data and raises
    /// CS when done.
    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), PanelError> {
        self.command_data(
            CASET,
            &[(x0 >> 8) as u8, x0 as u8, (x1 >> 8) as u8, x1 as u8],
        )?;
        self.command_data(
            RASET,
            &[(y0 >> 8) as u8, y0 as u8, (y1 >> 8) as u8, y1 as u8],
        )?;

        self.cs.set_low();
        self.dc.set_low();
        if self.spi.blocking_write(&[RAMWR]).is_err() {
            self.cs.set_high();
            return Err(PanelError::Bus);
        }
        self.dc.set_high();
        Ok(())
    }

    /// Stream one color over a whole window
    fn fill_window(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    ) -> Result<(), PanelError> {
        self.set_window(x0, y0, x1, y1)?;

        let mut line = [0u8; 128];
        for px in line.chunks_exact_mut(2) {
            px[0] = (color >> 8) as u8;
            px[1] = color as u8;
        }

        let pixels = (x1 - x0 + 1) as usize * (y1 - y0 + 1) as usize;
        let mut remaining = pixels * 2;
        while remaining > 0 {
            let take = remaining.min(line.len());
            if self.spi.blocking_write(&line[..take]).is_err() {
                self.cs.set_high();
                return Err(PanelError::Bus);
            }
            remaining -= take;
        }
        self.cs.set_high();
        Ok(())
    }
}

fn rgb(color: u16) -> Rgb565 {
    Rgb565::from(RawU16::new(color))
}

impl OriginDimensions for St7789<'_> {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for St7789<'_> {
    type Color = Rgb565;
    type Error = PanelError;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 || point.x >= WIDTH as i32 || point.y >= HEIGHT as i32 {
                continue;
            }
            let (x, y) = (point.x as u16, point.y as u16);
            let raw = RawU16::from(color).into_inner();
            self.set_window(x, y, x, y)?;
            let res = self.spi.blocking_write(&[(raw >> 8) as u8, raw as u8]);
            self.cs.set_high();
            res.map_err(|_| PanelError::Bus)?;
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        let Some(bottom_right) = clipped.bottom_right() else {
            return Ok(());
        };
        self.fill_window(
            clipped.top_left.x as u16,
            clipped.top_left.y as u16,
            bottom_right.x as u16,
            bottom_right.y as u16,
            RawU16::from(color).into_inner(),
        )
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_window(0, 0, WIDTH - 1, HEIGHT - 1, RawU16::from(color).into_inner())
    }
}

impl Panel for St7789<'_> {
    fn bring_up(&mut self) -> Result<(), PanelError> {
        // hardware reset
        self.rst.set_low();
        block_for(Duration::from_millis(10));
        self.rst.set_high();
        block_for(Duration::from_millis(120));

        self.command(SWRESET)?;
        block_for(Duration::from_millis(150));

        self.command(SLPOUT)?;
        block_for(Duration::from_millis(10));

        // RGB565, portrait, inversion on (panel ships inverted)
        self.command_data(COLMOD, &[0x55])?;
        self.command_data(MADCTL, &[0x00])?;
        self.command(INVON)?;

        // enable the brightness control block
        self.command_data(WRCTRLD, &[0x2C])?;

        self.command(NORON)?;
        self.command(DISPON)?;
        block_for(Duration::from_millis(10));
        Ok(())
    }

    fn power(&mut self, on: bool) -> Result<(), PanelError> {
        self.command(if on { DISPON } else { DISPOFF })
    }

    fn set_contrast(&mut self, level: u16) -> Result<(), PanelError> {
        // VCOM tracks perceived contrast on this controller
        self.command_data(VCOMS, &[(level & 0x3F) as u8])
    }

    fn set_brightness(&mut self, level: u16) -> Result<(), PanelError> {
        self.command_data(WRDISBV, &[level.min(255) as u8])
    }

    fn fill_screen(&mut self, color: u16) -> Result<(), PanelError> {
        self.clear(rgb(color))
    }

    fn draw_point(&mut self, x: u16, y: u16, color: u16) -> Result<(), PanelError> {
        Pixel(Point::new(x as i32, y as i32), rgb(color)).draw(self)
    }

    fn draw_line(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    ) -> Result<(), PanelError> {
        Line::new(
            Point::new(x0 as i32, y0 as i32),
            Point::new(x1 as i32, y1 as i32),
        )
        .into_styled(PrimitiveStyle::with_stroke(rgb(color), 1))
        .draw(self)
    }

    fn draw_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    ) -> Result<(), PanelError> {
        Rectangle::with_corners(
            Point::new(x0 as i32, y0 as i32),
            Point::new(x1 as i32, y1 as i32),
        )
        .into_styled(PrimitiveStyle::with_stroke(rgb(color), 1))
        .draw(self)
    }

    fn fill_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    ) -> Result<(), PanelError> {
        Rectangle::with_corners(
            Point::new(x0 as i32, y0 as i32),
            Point::new(x1 as i32, y1 as i32),
        )
        .into_styled(PrimitiveStyle::with_fill(rgb(color)))
        .draw(self)
    }

    fn draw_circle(&mut self, x: u16, y: u16, radius: u16, color: u16) -> Result<(), PanelError> {
        Circle::with_center(Point::new(x as i32, y as i32), radius as u32 * 2)
            .into_styled(PrimitiveStyle::with_stroke(rgb(color), 1))
            .draw(self)
    }

    fn fill_circle(&mut self, x: u16, y: u16, radius: u16, color: u16) -> Result<(), PanelError> {
        Circle::with_center(Point::new(x as i32, y as i32), radius as u32 * 2)
            .into_styled(PrimitiveStyle::with_fill(rgb(color)))
            .draw(self)
    }

    fn draw_round_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    ) -> Result<(), PanelError> {
        RoundedRectangle::with_equal_corners(
            Rectangle::with_corners(
                Point::new(x0 as i32, y0 as i32),
                Point::new(x1 as i32, y1 as i32),
            ),
            Size::new(CORNER_RADIUS, CORNER_RADIUS),
        )
        .into_styled(PrimitiveStyle::with_stroke(rgb(color), 1))
        .draw(self)
    }

    fn fill_round_rect(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        color: u16,
    ) -> Result<(), PanelError> {
        RoundedRectangle::with_equal_corners(
            Rectangle::with_corners(
                Point::new(x0 as i32, y0 as i32),
                Point::new(x1 as i32, y1 as i32),
            ),
            Size::new(CORNER_RADIUS, CORNER_RADIUS),
        )
        .into_styled(PrimitiveStyle::with_fill(rgb(color)))
        .draw(self)
    }

    fn draw_text(
        &mut self,
        x: u16,
        y: u16,
        text: &str,
        font: FontId,
        fg: u16,
        bg: u16,
    ) -> Result<(), PanelError> {
        let style = MonoTextStyleBuilder::new()
            .font(match font {
                FontId::Small => &FONT_8X13,
                FontId::Large => &FONT_10X20,
            })
            .text_color(rgb(fg))
            .background_color(rgb(bg))
            .build();

        Text::with_baseline(
            text,
            Point::new(x as i32, y as i32),
            style,
            Baseline::Top,
        )
        .draw(self)
        .map(|_| ())
    }
}
