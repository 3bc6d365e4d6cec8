//! WebGL "parallax wallpaper": an image on a full-screen quad, rippled around
//! the pointer with chromatic aberration and a cheap bloom tint.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use wasm_bindgen::prelude::*;
use web_sys::{
	HtmlCanvasElement, HtmlImageElement, MouseEvent, WebGlProgram, WebGlRenderingContext as GL,
	WebGlShader, WebGlUniformLocation, Window,
};

use super::error::MountError;
use super::render::Bounds;
use super::runner::viewport;
use super::scheduler::{FrameLoop, Subscription};
use super::theme::WallpaperStyle;

const VERTEX_SHADER: &str = r#"
attribute vec2 position;
varying vec2 vUv;
void main() {
	vUv = position * 0.5 + 0.5;
	vUv.y = 1.0 - vUv.y;
	gl_Position = vec4(position, 0.0, 1.0);
}
"#;

const FRAGMENT_SHADER: &str = r#"
precision highp float;
varying vec2 vUv;
uniform sampler2D uTexture;
uniform vec2 uResolution;
uniform vec2 uMouse;
uniform float uTime;
uniform float uParallax;

void main() {
	vec2 uv = vUv;
	uv += (uMouse - 0.5) * uParallax * 0.02;

	vec2 distVec = vUv - uMouse;
	float dist = length(distVec);
	float ripple = sin(dist * 40.0 - uTime * 4.0) * 0.005;
	ripple += sin(dist * 20.0 - uTime * 2.0) * 0.003;
	float mask = smoothstep(0.4, 0.0, dist);
	uv += (distVec / max(dist, 0.01)) * ripple * mask;

	float r = texture2D(uTexture, uv + vec2(0.002, 0.0) * mask).r;
	float g = texture2D(uTexture, uv).g;
	float b = texture2D(uTexture, uv - vec2(0.002, 0.0) * mask).b;
	vec4 color = vec4(r, g, b, 1.0);

	float brightness = (r + g + b) / 3.0;
	if (brightness > 0.8) {
		color.rgb += vec3(0.1, 0.05, 0.2) * mask;
	}
	gl_FragColor = color;
}
"#;

/// Two triangles covering clip space, drawn as a strip.
const QUAD: [f32; 8] = [-1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0, 1.0];

/// Per-frame shader inputs, kept separate from GL so the bookkeeping is testable.
#[derive(Clone, Debug, PartialEq)]
pub struct WallpaperState {
	/// Pointer position as a fraction of the viewport, `(0.5, 0.5)` until it moves
	pub pointer: (f64, f64),
	/// Seconds since the page's time origin
	pub time: f64,
	pub resolution: Bounds,
	pub parallax: f64,
}

impl WallpaperState {
	pub fn new(style: &WallpaperStyle, resolution: Bounds) -> Self {
		Self {
			pointer: (0.5, 0.5),
			time: 0.0,
			resolution,
			parallax: style.parallax,
		}
	}

	/// Client pointer coordinates, normalised against the viewport.
	pub fn pointer_moved(&mut self, client_x: f64, client_y: f64, viewport: Bounds) {
		if viewport.width <= 0.0 || viewport.height <= 0.0 {
			return;
		}
		self.pointer = (client_x / viewport.width, client_y / viewport.height);
	}

	/// Frame timestamps arrive in milliseconds.
	pub fn advance(&mut self, timestamp_ms: f64) {
		self.time = timestamp_ms * 0.001;
	}

	pub fn resize(&mut self, resolution: Bounds) {
		self.resolution = resolution;
	}
}

struct Uniforms {
	resolution: Option<WebGlUniformLocation>,
	mouse: Option<WebGlUniformLocation>,
	time: Option<WebGlUniformLocation>,
	parallax: Option<WebGlUniformLocation>,
}

impl Uniforms {
	fn locate(gl: &GL, program: &WebGlProgram) -> Self {
		Self {
			resolution: gl.get_uniform_location(program, "uResolution"),
			mouse: gl.get_uniform_location(program, "uMouse"),
			time: gl.get_uniform_location(program, "uTime"),
			parallax: gl.get_uniform_location(program, "uParallax"),
		}
	}

	fn upload(&self, gl: &GL, state: &WallpaperState) {
		gl.uniform2f(
			self.resolution.as_ref(),
			state.resolution.width as f32,
			state.resolution.height as f32,
		);
		gl.uniform2f(self.mouse.as_ref(), state.pointer.0 as f32, state.pointer.1 as f32);
		gl.uniform1f(self.time.as_ref(), state.time as f32);
		gl.uniform1f(self.parallax.as_ref(), state.parallax as f32);
	}
}

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, MountError> {
	let shader = gl
		.create_shader(kind)
		.ok_or_else(|| MountError::Shader("unable to create shader".into()))?;
	gl.shader_source(&shader, source);
	gl.compile_shader(&shader);

	if gl
		.get_shader_parameter(&shader, GL::COMPILE_STATUS)
		.as_bool()
		.unwrap_or(false)
	{
		Ok(shader)
	} else {
		Err(MountError::Shader(
			gl.get_shader_info_log(&shader)
				.unwrap_or_else(|| "unknown compile error".into()),
		))
	}
}

fn link_program(gl: &GL) -> Result<WebGlProgram, MountError> {
	let vertex = compile_shader(gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
	let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
	let program = gl
		.create_program()
		.ok_or_else(|| MountError::Shader("unable to create program".into()))?;
	gl.attach_shader(&program, &vertex);
	gl.attach_shader(&program, &fragment);
	gl.link_program(&program);

	if gl
		.get_program_parameter(&program, GL::LINK_STATUS)
		.as_bool()
		.unwrap_or(false)
	{
		Ok(program)
	} else {
		Err(MountError::Shader(
			gl.get_program_info_log(&program)
				.unwrap_or_else(|| "unknown link error".into()),
		))
	}
}

fn upload_quad(gl: &GL, program: &WebGlProgram) -> Result<(), MountError> {
	let buffer = gl
		.create_buffer()
		.ok_or_else(|| MountError::Js("unable to create vertex buffer".into()))?;
	gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
	let vertices = js_sys::Float32Array::from(&QUAD[..]);
	gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &vertices, GL::STATIC_DRAW);

	let position = gl.get_attrib_location(program, "position");
	if position < 0 {
		return Err(MountError::Shader("missing position attribute".into()));
	}
	gl.enable_vertex_attrib_array(position as u32);
	gl.vertex_attrib_pointer_with_i32(position as u32, 2, GL::FLOAT, false, 0, 0);
	Ok(())
}

fn resize_canvas(window: &Window, canvas: &HtmlCanvasElement, gl: &GL) -> Bounds {
	let bounds = viewport(window);
	canvas.set_width(bounds.width as u32);
	canvas.set_height(bounds.height as u32);
	gl.viewport(0, 0, bounds.width as i32, bounds.height as i32);
	bounds
}

/// A running wallpaper. Dropping it stops rendering, removes listeners and
/// detaches the pending image load.
pub struct WallpaperHandle {
	frames: FrameLoop,
	image: HtmlImageElement,
	_on_load: Closure<dyn FnMut()>,
	_listeners: Vec<Subscription>,
	state: Rc<RefCell<WallpaperState>>,
}

impl WallpaperHandle {
	pub fn state(&self) -> WallpaperState {
		self.state.borrow().clone()
	}

	pub fn is_running(&self) -> bool {
		self.frames.is_running()
	}
}

impl Drop for WallpaperHandle {
	fn drop(&mut self) {
		self.frames.cancel();
		self.image.set_onload(None);
	}
}

/// Start the shader wallpaper on `canvas`, textured with `image_url`.
///
/// The texture is uploaded once the image loads. Until then, or if it never
/// loads, the shader samples an empty texture.
pub fn mount_wallpaper(
	canvas: HtmlCanvasElement,
	image_url: &str,
	style: &WallpaperStyle,
) -> Result<WallpaperHandle, MountError> {
	let window = web_sys::window().ok_or(MountError::NoWindow)?;
	let gl: GL = canvas
		.get_context("webgl")
		.map_err(|_| MountError::ContextUnavailable("webgl"))?
		.ok_or(MountError::ContextUnavailable("webgl"))?
		.dyn_into()
		.map_err(|_| MountError::ContextUnavailable("webgl"))?;

	let program = link_program(&gl)?;
	gl.use_program(Some(&program));
	upload_quad(&gl, &program)?;
	let uniforms = Uniforms::locate(&gl, &program);

	let texture = gl
		.create_texture()
		.ok_or_else(|| MountError::Js("unable to create texture".into()))?;
	let image = HtmlImageElement::new()?;
	image.set_cross_origin(Some("anonymous"));

	let (gl_load, image_load) = (gl.clone(), image.clone());
	let on_load = Closure::<dyn FnMut()>::new(move || {
		gl_load.bind_texture(GL::TEXTURE_2D, Some(&texture));
		let uploaded = gl_load.tex_image_2d_with_u32_and_u32_and_image(
			GL::TEXTURE_2D,
			0,
			GL::RGBA as i32,
			GL::RGBA,
			GL::UNSIGNED_BYTE,
			&image_load,
		);
		if let Err(e) = uploaded {
			debug!("deck-fx: wallpaper texture upload failed: {:?}", e);
			return;
		}
		gl_load.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_MIN_FILTER, GL::LINEAR as i32);
		gl_load.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_S, GL::CLAMP_TO_EDGE as i32);
		gl_load.tex_parameteri(GL::TEXTURE_2D, GL::TEXTURE_WRAP_T, GL::CLAMP_TO_EDGE as i32);
		debug!("deck-fx: wallpaper texture uploaded");
	});
	image.set_onload(Some(on_load.as_ref().unchecked_ref()));
	image.set_src(image_url);

	let bounds = resize_canvas(&window, &canvas, &gl);
	let state = Rc::new(RefCell::new(WallpaperState::new(style, bounds)));

	let mut listeners = Vec::with_capacity(2);

	let (state_resize, window_resize, canvas_resize, gl_resize) =
		(state.clone(), window.clone(), canvas.clone(), gl.clone());
	listeners.push(Subscription::listen(&window, "resize", move |_| {
		let bounds = resize_canvas(&window_resize, &canvas_resize, &gl_resize);
		state_resize.borrow_mut().resize(bounds);
	})?);

	let (state_move, window_move) = (state.clone(), window.clone());
	listeners.push(Subscription::listen(&window, "mousemove", move |ev| {
		let Some(ev) = ev.dyn_ref::<MouseEvent>() else {
			return;
		};
		state_move.borrow_mut().pointer_moved(
			ev.client_x() as f64,
			ev.client_y() as f64,
			viewport(&window_move),
		);
	})?);

	let state_frame = state.clone();
	let frames = FrameLoop::start(&window, move |timestamp| {
		let mut state = state_frame.borrow_mut();
		state.advance(timestamp);
		gl.clear(GL::COLOR_BUFFER_BIT);
		uniforms.upload(&gl, &state);
		gl.draw_arrays(GL::TRIANGLE_STRIP, 0, 4);
	})?;

	info!("deck-fx: wallpaper started with {}", image_url);

	Ok(WallpaperHandle {
		frames,
		image,
		_on_load: on_load,
		_listeners: listeners,
		state,
	})
}
