// What you SEE:
// • The image, with the RLE mask painted on top in the highlight color.
// • M toggles between overlay and the plain image.
// • R re-reads the mask file and redraws (a bad mask keeps the old picture).
// • Hold Left Mouse and drag to draw an elliptical ROI; C clears them.
// • ESC quits.
// With --output no window opens; the overlay is written as PNG instead.

use std::process::ExitCode;

use clap::Parser;
use log::{error, info};
use mask_overlay::annotate::{self, EllipseRoi};
use mask_overlay::cli::CliArgs;
use mask_overlay::display::{Drawer, Screen, draw_crosshair};
use mask_overlay::pipeline::{OverlayContext, OverlayRequest, OverlayResult};
use mask_overlay::{Error, source};

fn main() -> ExitCode {
    let args = CliArgs::parse();
    let level = if args.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: CliArgs) -> Result<(), Error> {
    let ctx = OverlayContext::init(args.overlay_config())?;

    /* --- One request: image bytes + mask text in, highlighted buffer out --- */
    let request = OverlayRequest {
        image_bytes: source::read_file(&args.image)?,
        rle: ctx.config().rle.load()?,
    };
    let result = ctx.run(&request)?;

    if let Some(path) = &args.output {
        source::save_png(&result.output, path)?;
        info!("wrote {}", path.display());
        return Ok(());
    }

    show(&ctx, result, &args)
}

fn show(ctx: &OverlayContext, mut current: OverlayResult, args: &CliArgs) -> Result<(), Error> {
    let title = format!("Mask Overlay: {}", args.image.display());
    let mut drawer = Drawer::new(&title, current.width as usize, current.height as usize)?;

    let mut screen = Screen::new(current.width as usize, current.height as usize);
    let mut roi = EllipseRoi::new();
    let mut show_overlay = true;

    while drawer.is_open() && !drawer.esc_pressed() {
        /* 1) Inputs */
        if drawer.m_pressed_once() {
            show_overlay = !show_overlay;
        }
        if drawer.c_pressed_once() {
            roi.clear();
        }
        if drawer.r_pressed_once() {
            // Only swap the picture once the whole request succeeded.
            match ctx
                .config()
                .rle
                .load()
                .and_then(|rle| ctx.apply(current.source.clone(), &rle))
            {
                Ok(next) => current = next,
                Err(e) => error!("reload failed, keeping current overlay: {e}"),
            }
        }

        let mouse = drawer.mouse_pos();
        if let Some(e) = roi.update(mouse, drawer.left_mouse_down()) {
            annotate::report(&current.source, &e);
        }

        /* 2) Base image for this frame */
        screen.load(if show_overlay { &current.output } else { &current.source });

        /* 3) Annotations + crosshair on top */
        roi.render(&mut screen, 0x00_00_FF_FF);
        if let Some((mx, my)) = mouse {
            draw_crosshair(&mut screen, mx as i32, my as i32, 12, 0x00_FF_CC_33);
        }

        /* 4) Present */
        drawer.present(&screen)?;
    }

    Ok(())
}
