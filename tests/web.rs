#![cfg(target_arch = "wasm32")]

use deck_fx::components::effects::{
	CanvasEffect, HudBorderFx, MountError, PointerTrail, SeededRng, SizeSource, Theme,
	mount_effect, mount_wallpaper,
};
use wasm_bindgen::JsCast;
use wasm_bindgen_test::*;
use web_sys::{HtmlCanvasElement, HtmlElement, MouseEvent, MouseEventInit};

wasm_bindgen_test_configure!(run_in_browser);

fn document() -> web_sys::Document {
	web_sys::window().unwrap().document().unwrap()
}

/// Let the browser run a few frames and deliver observer callbacks.
async fn settle() {
	let promise = js_sys::Promise::new(&mut |resolve, _| {
		web_sys::window()
			.unwrap()
			.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, 100)
			.unwrap();
	});
	wasm_bindgen_futures::JsFuture::from(promise).await.unwrap();
}

fn viewport_width() -> u32 {
	web_sys::window().unwrap().inner_width().unwrap().as_f64().unwrap() as u32
}

fn attach_frame(style: &str) -> HtmlElement {
	let doc = document();
	let frame: HtmlElement = doc.create_element("div").unwrap().dyn_into().unwrap();
	frame.set_attribute("style", style).unwrap();
	doc.body().unwrap().append_child(&frame).unwrap();
	frame
}

fn attach_canvas(parent: &HtmlElement) -> HtmlCanvasElement {
	let canvas: HtmlCanvasElement = document()
		.create_element("canvas")
		.unwrap()
		.dyn_into()
		.unwrap();
	parent.append_child(&canvas).unwrap();
	canvas
}

#[wasm_bindgen_test]
fn trail_fills_the_viewport() {
	let window = web_sys::window().unwrap();
	let canvas = attach_canvas(&document().body().unwrap());

	let handle = mount_effect(
		canvas.clone(),
		PointerTrail::new(Theme::default().trail),
		Box::new(SeededRng::new(1)),
		SizeSource::Window,
	)
	.expect("2d context should be available");

	let width = window.inner_width().unwrap().as_f64().unwrap() as u32;
	assert_eq!(canvas.width(), width);
	assert!(handle.is_running());
	assert!(handle.update(|trail| trail.is_empty()));

	handle.stop();
	canvas.remove();
}

#[wasm_bindgen_test]
fn mousemove_spawns_trail_particles() {
	let window = web_sys::window().unwrap();
	let canvas = attach_canvas(&document().body().unwrap());
	let handle = mount_effect(
		canvas.clone(),
		PointerTrail::new(Theme::default().trail),
		Box::new(SeededRng::new(2)),
		SizeSource::Window,
	)
	.unwrap();

	let init = MouseEventInit::new();
	init.set_client_x(40);
	init.set_client_y(30);
	let ev = MouseEvent::new_with_mouse_event_init_dict("mousemove", &init).unwrap();
	window.dispatch_event(&ev).unwrap();

	let spawned = handle.update(|trail| trail.len());
	assert!(spawned >= Theme::default().trail.batch);

	drop(handle);
	// listener is gone with the handle
	window.dispatch_event(&ev).unwrap();
	canvas.remove();
}

#[wasm_bindgen_test]
fn hud_border_takes_parent_size() {
	let frame = attach_frame("width: 240px; height: 120px; position: relative;");
	let canvas = attach_canvas(&frame);

	let handle = mount_effect(
		canvas.clone(),
		HudBorderFx::new(Theme::default().border, false),
		Box::new(SeededRng::new(3)),
		SizeSource::Parent,
	)
	.unwrap();

	assert_eq!((canvas.width(), canvas.height()), (240, 120));
	assert_eq!(handle.update(|fx| fx.len()), Theme::default().border.count);
	handle.update(|fx| fx.set_active(true));
	assert!(handle.update(|fx| fx.is_active()));

	handle.stop();
	frame.remove();
}

#[wasm_bindgen_test(async)]
async fn hud_border_follows_container_resize() {
	let frame = attach_frame("width: 240px; height: 0px; position: relative;");
	let canvas = attach_canvas(&frame);
	canvas
		.set_attribute("style", "position: absolute; top: 0; left: 0;")
		.unwrap();

	let handle = mount_effect(
		canvas.clone(),
		HudBorderFx::new(Theme::default().border, true),
		Box::new(SeededRng::new(4)),
		SizeSource::Parent,
	)
	.unwrap();
	assert_eq!(canvas.height(), 0);

	// content arriving later grows the container without any window resize
	frame
		.set_attribute("style", "width: 320px; height: 180px; position: relative;")
		.unwrap();
	settle().await;

	assert_eq!((canvas.width(), canvas.height()), (320, 180));

	handle.stop();
	frame.remove();
}

#[wasm_bindgen_test]
fn effect_on_claimed_canvas_is_unsupported() {
	let canvas = attach_canvas(&document().body().unwrap());
	let claimed = ["webgl", "bitmaprenderer"]
		.iter()
		.any(|kind| matches!(canvas.get_context(kind), Ok(Some(_))));
	assert!(claimed, "no non-2d context to occupy the canvas with");

	let result = mount_effect(
		canvas.clone(),
		PointerTrail::new(Theme::default().trail),
		Box::new(SeededRng::new(5)),
		SizeSource::Window,
	);
	match result {
		Err(e) => {
			assert!(e.is_unsupported());
			assert!(matches!(e, MountError::ContextUnavailable("2d")));
		}
		Ok(_) => panic!("mounted on a canvas without a 2d context"),
	}
	canvas.remove();
}

#[wasm_bindgen_test]
fn wallpaper_on_2d_canvas_is_unsupported() {
	let canvas = attach_canvas(&document().body().unwrap());
	assert!(matches!(canvas.get_context("2d"), Ok(Some(_))));

	let result = mount_wallpaper(canvas.clone(), "data:,", &Theme::default().wallpaper);
	match result {
		Err(e) => {
			assert!(e.is_unsupported());
			assert!(matches!(e, MountError::ContextUnavailable("webgl")));
		}
		Ok(_) => panic!("mounted a wallpaper on a 2d canvas"),
	}
	canvas.remove();
}

#[wasm_bindgen_test(async)]
async fn wallpaper_fills_viewport_and_animates() {
	let canvas = attach_canvas(&document().body().unwrap());
	let handle = match mount_wallpaper(canvas.clone(), "data:,", &Theme::default().wallpaper) {
		Ok(handle) => handle,
		// headless browser without WebGL
		Err(e) if e.is_unsupported() => {
			canvas.remove();
			return;
		}
		Err(e) => panic!("wallpaper failed: {}", e),
	};

	assert_eq!(canvas.width(), viewport_width());
	assert!(handle.is_running());
	let state = handle.state();
	assert_eq!(state.pointer, (0.5, 0.5));
	assert_eq!(state.resolution.width as u32, viewport_width());

	settle().await;
	assert!(handle.state().time > 0.0);

	drop(handle);
	canvas.remove();
}

#[wasm_bindgen_test]
fn dropping_the_handle_stops_listening() {
	let window = web_sys::window().unwrap();
	let canvas = attach_canvas(&document().body().unwrap());
	let handle = mount_effect(
		canvas.clone(),
		HudBorderFx::new(Theme::default().border, false),
		Box::new(SeededRng::new(6)),
		SizeSource::Window,
	)
	.unwrap();
	assert_eq!(canvas.width(), viewport_width());
	drop(handle);

	canvas.set_width(1);
	window.dispatch_event(&web_sys::Event::new("resize").unwrap()).unwrap();
	assert_eq!(canvas.width(), 1);
	canvas.remove();
}
