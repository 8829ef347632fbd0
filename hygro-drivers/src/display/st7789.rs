//! ST7789 panel controller over SPI
//!
//! 4-wire SPI: the DC pin selects command (low) or parameter/pixel data
//! (high). Pixels are RGB565 sent big-endian.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;
use hygro_hal::PanelBus;

/// ST7789 commands
pub mod cmd {
    pub const SWRESET: u8 = 0x01;
    pub const SLPOUT: u8 = 0x11;
    pub const NORON: u8 = 0x13;
    pub const INVOFF: u8 = 0x20;
    pub const INVON: u8 = 0x21;
    pub const DISPOFF: u8 = 0x28;
    pub const DISPON: u8 = 0x29;
    pub const CASET: u8 = 0x2A;
    pub const RASET: u8 = 0x2B;
    pub const RAMWR: u8 = 0x2C;
    pub const MADCTL: u8 = 0x36;
    pub const COLMOD: u8 = 0x3A;
}

/// MADCTL: row address order (vertical mirror)
pub const MADCTL_MY: u8 = 0x80;
/// MADCTL: column address order (horizontal mirror)
pub const MADCTL_MX: u8 = 0x40;
/// MADCTL: row/column exchange
pub const MADCTL_MV: u8 = 0x20;

/// COLMOD parameter for 16 bits per pixel
const COLMOD_RGB565: u8 = 0x55;

/// Pixels converted to wire bytes per SPI write
const CHUNK_PIXELS: usize = 64;

/// ST7789 driver error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum St7789Error<E> {
    /// SPI transfer failed
    Spi(E),
    /// DC or reset pin could not be driven
    Pin,
    /// Fewer pixels than the target window holds
    ShortBuffer,
}

/// ST7789 driver
pub struct St7789<SPI, DC, RST, D> {
    spi: SPI,
    dc: DC,
    rst: RST,
    delay: D,
    gap: (u16, u16),
    madctl: u8,
}

impl<SPI, DC, RST, D> St7789<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    /// Create a driver; call [`PanelBus::init`] before drawing
    pub fn new(spi: SPI, dc: DC, rst: RST, delay: D) -> Self {
        Self {
            spi,
            dc,
            rst,
            delay,
            gap: (0, 0),
            madctl: 0,
        }
    }

    /// Give back the bus and pins
    pub fn release(self) -> (SPI, DC, RST, D) {
        (self.spi, self.dc, self.rst, self.delay)
    }

    fn command(&mut self, command: u8, params: &[u8]) -> Result<(), St7789Error<SPI::Error>> {
        self.dc.set_low().map_err(|_| St7789Error::Pin)?;
        self.spi.write(&[command]).map_err(St7789Error::Spi)?;
        if !params.is_empty() {
            self.dc.set_high().map_err(|_| St7789Error::Pin)?;
            self.spi.write(params).map_err(St7789Error::Spi)?;
        }
        Ok(())
    }

    fn hard_reset(&mut self) -> Result<(), St7789Error<SPI::Error>> {
        self.rst.set_high().map_err(|_| St7789Error::Pin)?;
        self.delay.delay_ms(1);
        self.rst.set_low().map_err(|_| St7789Error::Pin)?;
        self.delay.delay_ms(10);
        self.rst.set_high().map_err(|_| St7789Error::Pin)?;
        self.delay.delay_ms(120);
        Ok(())
    }

    fn set_window(&mut self, x0: u16, y0: u16, x1: u16, y1: u16) -> Result<(), St7789Error<SPI::Error>> {
        // Controller window ends are inclusive
        let (gx, gy) = self.gap;
        let xs = x0.saturating_add(gx);
        let xe = (x1 - 1).saturating_add(gx);
        let ys = y0.saturating_add(gy);
        let ye = (y1 - 1).saturating_add(gy);

        let [xs_h, xs_l] = xs.to_be_bytes();
        let [xe_h, xe_l] = xe.to_be_bytes();
        self.command(cmd::CASET, &[xs_h, xs_l, xe_h, xe_l])?;
        let [ys_h, ys_l] = ys.to_be_bytes();
        let [ye_h, ye_l] = ye.to_be_bytes();
        self.command(cmd::RASET, &[ys_h, ys_l, ye_h, ye_l])
    }
}

impl<SPI, DC, RST, D> PanelBus for St7789<SPI, DC, RST, D>
where
    SPI: SpiDevice,
    DC: OutputPin,
    RST: OutputPin,
    D: DelayNs,
{
    type Error = St7789Error<SPI::Error>;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.hard_reset()?;

        self.command(cmd::SWRESET, &[])?;
        self.delay.delay_ms(150);
        self.command(cmd::SLPOUT, &[])?;
        self.delay.delay_ms(10);

        self.command(cmd::COLMOD, &[COLMOD_RGB565])?;
        self.command(cmd::MADCTL, &[self.madctl])?;
        self.command(cmd::NORON, &[])?;
        self.delay.delay_ms(10);
        Ok(())
    }

    fn draw_bitmap(
        &mut self,
        x0: u16,
        y0: u16,
        x1: u16,
        y1: u16,
        pixels: &[u16],
    ) -> Result<(), Self::Error> {
        if x1 <= x0 || y1 <= y0 {
            return Ok(());
        }
        let count = usize::from(x1 - x0) * usize::from(y1 - y0);
        let pixels = pixels.get(..count).ok_or(St7789Error::ShortBuffer)?;

        self.set_window(x0, y0, x1, y1)?;
        self.command(cmd::RAMWR, &[])?;
        self.dc.set_high().map_err(|_| St7789Error::Pin)?;

        let mut bytes = [0u8; CHUNK_PIXELS * 2];
        for chunk in pixels.chunks(CHUNK_PIXELS) {
            for (out, px) in bytes.chunks_exact_mut(2).zip(chunk) {
                out.copy_from_slice(&px.to_be_bytes());
            }
            self.spi
                .write(&bytes[..chunk.len() * 2])
                .map_err(St7789Error::Spi)?;
        }
        Ok(())
    }

    fn set_orientation(&mut self, swap_xy: bool, mirror_x: bool, mirror_y: bool) -> Result<(), Self::Error> {
        let mut madctl = 0;
        if mirror_y {
            madctl |= MADCTL_MY;
        }
        if mirror_x {
            madctl |= MADCTL_MX;
        }
        if swap_xy {
            madctl |= MADCTL_MV;
        }
        self.madctl = madctl;
        self.command(cmd::MADCTL, &[madctl])
    }

    fn set_gap(&mut self, x: u16, y: u16) -> Result<(), Self::Error> {
        self.gap = (x, y);
        Ok(())
    }

    fn set_inverted(&mut self, inverted: bool) -> Result<(), Self::Error> {
        self.command(if inverted { cmd::INVON } else { cmd::INVOFF }, &[])
    }

    fn set_display_on(&mut self, on: bool) -> Result<(), Self::Error> {
        self.command(if on { cmd::DISPON } else { cmd::DISPOFF }, &[])
    }
}
