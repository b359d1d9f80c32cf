//! Direct2D renderer for the clock face.
//!
//! Device-independent resources (the Direct2D factory and the two
//! DirectWrite text formats) live for the whole process. The render
//! target and its brushes are device-dependent: they are dropped when
//! Direct2D reports `D2DERR_RECREATE_TARGET` and rebuilt on the next paint.

use desktop_clock_core::config::TextConfig;
use desktop_clock_core::{
    Color, GraphicsError, Palette, Scene, Size, TextRole, TimeSource, log_debug, log_warn,
};
use windows::Win32::Foundation::{HWND, RECT};
use windows::Win32::Graphics::Direct2D::Common::{D2D_RECT_F, D2D_SIZE_U, D2D1_COLOR_F};
use windows::Win32::Graphics::Direct2D::{
    D2D1_DRAW_TEXT_OPTIONS_NONE, D2D1_FACTORY_TYPE_SINGLE_THREADED,
    D2D1_HWND_RENDER_TARGET_PROPERTIES, D2D1_PRESENT_OPTIONS_NONE, D2D1_RENDER_TARGET_PROPERTIES,
    D2D1CreateFactory, D2DERR_RECREATE_TARGET, ID2D1Factory, ID2D1HwndRenderTarget,
    ID2D1SolidColorBrush,
};
use windows::Win32::Graphics::DirectWrite::{
    DWRITE_FACTORY_TYPE_SHARED, DWRITE_FONT_STRETCH_NORMAL, DWRITE_FONT_STYLE_NORMAL,
    DWRITE_FONT_WEIGHT, DWRITE_MEASURING_MODE_NATURAL, DWRITE_PARAGRAPH_ALIGNMENT_CENTER,
    DWRITE_TEXT_ALIGNMENT_CENTER, DWriteCreateFactory, IDWriteFactory, IDWriteTextFormat,
};
use windows::Win32::UI::WindowsAndMessaging::GetClientRect;
use windows::core::{PCWSTR, w};

use crate::dpi;

/// Render target plus the brushes created from it.
struct DeviceResources {
    target: ID2D1HwndRenderTarget,
    time_brush: ID2D1SolidColorBrush,
    label_brush: ID2D1SolidColorBrush,
}

/// Text formats shared by every frame.
struct TextFormats {
    time: IDWriteTextFormat,
    label: IDWriteTextFormat,
}

/// Draws the clock into a window's client area.
pub struct Renderer {
    hwnd: HWND,
    dpi: u32,
    band_offset: f32,
    palette: Palette,
    factory: Option<ID2D1Factory>,
    formats: Option<TextFormats>,
    device: Option<DeviceResources>,
}

/// Maps a failed creation step to a fatal [`GraphicsError::Init`].
fn init_error(stage: &'static str) -> impl Fn(windows::core::Error) -> GraphicsError {
    move |e| GraphicsError::Init {
        stage,
        code: e.code().0,
    }
}

impl Renderer {
    /// Creates the factories, text formats and a render target bound to
    /// `hwnd`.
    ///
    /// Any failure here is fatal: the clock cannot draw anything.
    pub fn new(hwnd: HWND, text: &TextConfig, palette: Palette) -> Result<Self, GraphicsError> {
        let factory = unsafe {
            D2D1CreateFactory::<ID2D1Factory>(D2D1_FACTORY_TYPE_SINGLE_THREADED, None)
        }
        .map_err(init_error("Direct2D factory"))?;

        let dwrite = unsafe { DWriteCreateFactory::<IDWriteFactory>(DWRITE_FACTORY_TYPE_SHARED) }
            .map_err(init_error("DirectWrite factory"))?;

        let formats = TextFormats {
            time: create_text_format(&dwrite, &text.font, text.time_weight, text.time_size)
                .map_err(init_error("time text format"))?,
            label: create_text_format(&dwrite, &text.font, text.label_weight, text.label_size)
                .map_err(init_error("label text format"))?,
        };

        let mut renderer = Self {
            hwnd,
            dpi: dpi::window_dpi(hwnd),
            band_offset: text.band_offset,
            palette,
            factory: Some(factory),
            formats: Some(formats),
            device: None,
        };
        renderer.ensure_device()?;
        Ok(renderer)
    }

    /// Current DPI of the render target.
    pub fn dpi(&self) -> u32 {
        self.dpi
    }

    /// Draws one frame with a fresh reading of `clock`.
    ///
    /// Does nothing for an empty client area or after [`Renderer::shutdown`].
    /// On device loss the render target is discarded and
    /// [`GraphicsError::DeviceLost`] returned; the next call recreates it.
    pub fn render(&mut self, clock: &impl TimeSource) -> Result<(), GraphicsError> {
        if self.factory.is_none() {
            return Ok(());
        }

        let (width, height) = client_pixels(self.hwnd);
        let size = Size::from_pixels(width, height, self.dpi);
        let Some(scene) = Scene::build(&clock.snapshot(), size, self.band_offset, &self.palette)
        else {
            return Ok(());
        };

        self.ensure_device()?;
        let (Some(device), Some(formats)) = (&self.device, &self.formats) else {
            return Ok(());
        };

        match device.draw(&scene, formats) {
            Ok(()) => Ok(()),
            Err(e) if e.code() == D2DERR_RECREATE_TARGET => {
                log_warn!("render target lost, recreating on next paint");
                self.device = None;
                Err(GraphicsError::DeviceLost)
            }
            Err(e) => Err(GraphicsError::Draw { code: e.code().0 }),
        }
    }

    /// Resizes the render target to the given client size in pixels.
    ///
    /// No-op when there is no render target.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), GraphicsError> {
        let Some(device) = &self.device else {
            return Ok(());
        };
        unsafe { device.target.Resize(&D2D_SIZE_U { width, height }) }
            .map_err(|e| GraphicsError::Draw { code: e.code().0 })
    }

    /// Applies a new monitor DPI so sizes stay in DIPs.
    pub fn set_dpi(&mut self, dpi: u32) {
        self.dpi = if dpi == 0 { dpi::BASE_DPI } else { dpi };
        if let Some(device) = &self.device {
            unsafe { device.target.SetDpi(self.dpi as f32, self.dpi as f32) };
        }
    }

    /// Releases every Direct2D and DirectWrite object. Safe to call more
    /// than once; later renders are no-ops.
    pub fn shutdown(&mut self) {
        if self.factory.is_some() {
            log_debug!("releasing graphics resources");
        }
        self.device = None;
        self.formats = None;
        self.factory = None;
    }

    /// Creates the render target and brushes if they are missing.
    fn ensure_device(&mut self) -> Result<(), GraphicsError> {
        if self.device.is_some() {
            return Ok(());
        }
        let Some(factory) = &self.factory else {
            return Ok(());
        };

        let (width, height) = client_pixels(self.hwnd);
        let props = D2D1_RENDER_TARGET_PROPERTIES {
            dpiX: self.dpi as f32,
            dpiY: self.dpi as f32,
            ..Default::default()
        };
        let hwnd_props = D2D1_HWND_RENDER_TARGET_PROPERTIES {
            hwnd: self.hwnd,
            pixelSize: D2D_SIZE_U { width, height },
            presentOptions: D2D1_PRESENT_OPTIONS_NONE,
        };

        let target = unsafe { factory.CreateHwndRenderTarget(&props, &hwnd_props) }
            .map_err(init_error("render target"))?;
        let time_brush = unsafe { target.CreateSolidColorBrush(&d2d_color(self.palette.time), None) }
            .map_err(init_error("time brush"))?;
        let label_brush =
            unsafe { target.CreateSolidColorBrush(&d2d_color(self.palette.label), None) }
                .map_err(init_error("label brush"))?;

        log_debug!("render target created ({width}x{height} px, {} dpi)", self.dpi);
        self.device = Some(DeviceResources {
            target,
            time_brush,
            label_brush,
        });
        Ok(())
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl DeviceResources {
    /// Replays a scene between `BeginDraw` and `EndDraw`.
    fn draw(&self, scene: &Scene, formats: &TextFormats) -> windows::core::Result<()> {
        let background = d2d_color(scene.background);

        unsafe {
            self.target.BeginDraw();
            self.target.Clear(Some(&background));

            for run in &scene.runs {
                let (format, brush) = match run.role {
                    TextRole::Time => (&formats.time, &self.time_brush),
                    TextRole::Label => (&formats.label, &self.label_brush),
                };
                let text: Vec<u16> = run.text.encode_utf16().collect();
                let rect = D2D_RECT_F {
                    left: run.rect.left,
                    top: run.rect.top,
                    right: run.rect.right,
                    bottom: run.rect.bottom,
                };
                self.target.DrawText(
                    &text,
                    format,
                    &rect,
                    brush,
                    D2D1_DRAW_TEXT_OPTIONS_NONE,
                    DWRITE_MEASURING_MODE_NATURAL,
                );
            }

            self.target.EndDraw(None, None)
        }
    }
}

/// Creates a centered text format for the given family, weight and size.
fn create_text_format(
    factory: &IDWriteFactory,
    family: &str,
    weight: u16,
    size: f32,
) -> windows::core::Result<IDWriteTextFormat> {
    let family_wide: Vec<u16> = family.encode_utf16().chain(std::iter::once(0)).collect();

    unsafe {
        let format = factory.CreateTextFormat(
            PCWSTR(family_wide.as_ptr()),
            None,
            DWRITE_FONT_WEIGHT(i32::from(weight)),
            DWRITE_FONT_STYLE_NORMAL,
            DWRITE_FONT_STRETCH_NORMAL,
            size,
            w!("en-us"),
        )?;
        format.SetTextAlignment(DWRITE_TEXT_ALIGNMENT_CENTER)?;
        format.SetParagraphAlignment(DWRITE_PARAGRAPH_ALIGNMENT_CENTER)?;
        Ok(format)
    }
}

fn d2d_color(color: Color) -> D2D1_COLOR_F {
    let [r, g, b] = color.to_unit();
    D2D1_COLOR_F { r, g, b, a: 1.0 }
}

/// Client area size in physical pixels.
pub(crate) fn client_pixels(hwnd: HWND) -> (u32, u32) {
    let mut rc = RECT::default();
    unsafe {
        let _ = GetClientRect(hwnd, &mut rc);
    }
    (
        (rc.right - rc.left).max(0) as u32,
        (rc.bottom - rc.top).max(0) as u32,
    )
}
