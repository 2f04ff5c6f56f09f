// Copyright 2026 the Ribbon Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! WebGL2 plane renderer.
//!
//! Draws a [`GalleryPlan`]: every plane with the shared subdivided mesh and
//! a rounded-corner, object-cover fragment shader, then every caption quad.

use alloc::collections::BTreeMap;
use alloc::format;
use alloc::vec::Vec;

use js_sys::{Object, Reflect};
use wasm_bindgen::prelude::*;
use web_sys::{
    HtmlCanvasElement, HtmlImageElement, WebGl2RenderingContext as Gl, WebGlBuffer, WebGlProgram,
    WebGlShader, WebGlTexture, WebGlUniformLocation, WebGlVertexArrayObject,
};

use ribbon_core::texture::Texture;
use ribbon_render::{GalleryPlan, PlaneMesh, PlaneVertex, TextureKey};

const VERTEX_SHADER: &str = r"#version 300 es
layout(location = 0) in vec3 a_position;
layout(location = 1) in vec2 a_uv;
uniform mat4 u_view_projection;
uniform mat4 u_model;
out vec2 v_uv;
void main() {
    v_uv = a_uv;
    gl_Position = u_view_projection * u_model * vec4(a_position, 1.0);
}
";

const PLANE_FRAGMENT_SHADER: &str = r"#version 300 es
precision highp float;
uniform sampler2D u_texture;
uniform vec2 u_uv_scale;
uniform float u_border_radius;
in vec2 v_uv;
out vec4 frag_color;

float rounded_box(vec2 p, vec2 b, float r) {
    vec2 d = abs(p) - b;
    return length(max(d, vec2(0.0))) + min(max(d.x, d.y), 0.0) - r;
}

void main() {
    vec2 uv = v_uv * u_uv_scale + (1.0 - u_uv_scale) * 0.5;
    vec4 color = texture(u_texture, uv);
    float d = rounded_box(v_uv - 0.5, vec2(0.5 - u_border_radius), u_border_radius);
    float alpha = 1.0 - smoothstep(-0.002, 0.002, d);
    frag_color = vec4(color.rgb, alpha);
}
";

const CAPTION_FRAGMENT_SHADER: &str = r"#version 300 es
precision highp float;
uniform sampler2D u_texture;
in vec2 v_uv;
out vec4 frag_color;
void main() {
    vec4 color = texture(u_texture, v_uv);
    if (color.a < 0.1) discard;
    frag_color = color;
}
";

/// Placeholder shown until a slot's image arrives.
const PLACEHOLDER_RGBA: [u8; 4] = [0x19, 0x19, 0x19, 0xff];

/// Substituted for images that fail to load.
const FALLBACK_RGBA: [u8; 4] = [0x00, 0x00, 0x00, 0xff];

struct GpuMesh {
    vao: WebGlVertexArrayObject,
    vertices: WebGlBuffer,
    indices: WebGlBuffer,
    index_count: i32,
}

struct PlaneProgram {
    program: WebGlProgram,
    view_projection: WebGlUniformLocation,
    model: WebGlUniformLocation,
    texture: WebGlUniformLocation,
    uv_scale: WebGlUniformLocation,
    border_radius: WebGlUniformLocation,
}

struct CaptionProgram {
    program: WebGlProgram,
    view_projection: WebGlUniformLocation,
    model: WebGlUniformLocation,
    texture: WebGlUniformLocation,
}

/// Owns the GL context, programs, meshes and every uploaded texture.
pub struct PlaneRenderer {
    gl: Gl,
    planes: PlaneProgram,
    captions: CaptionProgram,
    plane_mesh: GpuMesh,
    quad_mesh: GpuMesh,
    textures: BTreeMap<TextureKey, WebGlTexture>,
    next_key: u64,
    placeholder: WebGlTexture,
    fallback: Texture<TextureKey>,
}

impl core::fmt::Debug for PlaneRenderer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PlaneRenderer")
            .field("textures", &self.textures.len())
            .field("next_key", &self.next_key)
            .finish_non_exhaustive()
    }
}

impl PlaneRenderer {
    /// Creates a WebGL2 context on `canvas` and uploads the shared meshes.
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let attributes = Object::new();
        Reflect::set(&attributes, &"alpha".into(), &JsValue::TRUE)?;
        Reflect::set(&attributes, &"antialias".into(), &JsValue::TRUE)?;
        Reflect::set(&attributes, &"premultipliedAlpha".into(), &JsValue::FALSE)?;
        let gl: Gl = canvas
            .get_context_with_context_options("webgl2", &attributes)?
            .ok_or_else(|| JsValue::from_str("browser does not support WebGL2"))?
            .unchecked_into();

        let planes = {
            let program = link_program(&gl, VERTEX_SHADER, PLANE_FRAGMENT_SHADER)?;
            PlaneProgram {
                view_projection: uniform(&gl, &program, "u_view_projection")?,
                model: uniform(&gl, &program, "u_model")?,
                texture: uniform(&gl, &program, "u_texture")?,
                uv_scale: uniform(&gl, &program, "u_uv_scale")?,
                border_radius: uniform(&gl, &program, "u_border_radius")?,
                program,
            }
        };
        let captions = {
            let program = link_program(&gl, VERTEX_SHADER, CAPTION_FRAGMENT_SHADER)?;
            CaptionProgram {
                view_projection: uniform(&gl, &program, "u_view_projection")?,
                model: uniform(&gl, &program, "u_model")?,
                texture: uniform(&gl, &program, "u_texture")?,
                program,
            }
        };

        let plane_mesh = upload_mesh(&gl, &PlaneMesh::gallery())?;
        let quad_mesh = upload_mesh(&gl, &PlaneMesh::quad())?;

        gl.pixel_storei(Gl::UNPACK_FLIP_Y_WEBGL, 1);
        gl.clear_color(0.0, 0.0, 0.0, 0.0);
        gl.disable(Gl::DEPTH_TEST);
        gl.enable(Gl::BLEND);
        gl.blend_func(Gl::SRC_ALPHA, Gl::ONE_MINUS_SRC_ALPHA);

        let placeholder = solid_texture(&gl, PLACEHOLDER_RGBA)?;
        let mut renderer = Self {
            gl,
            planes,
            captions,
            plane_mesh,
            quad_mesh,
            textures: BTreeMap::new(),
            next_key: 1,
            placeholder,
            fallback: Texture {
                handle: TextureKey(0),
                width: 2,
                height: 2,
                is_fallback: true,
            },
        };
        let fallback = solid_texture(&renderer.gl, FALLBACK_RGBA)?;
        renderer.fallback.handle = renderer.insert(fallback);
        Ok(renderer)
    }

    /// The texture substituted for failed loads.
    #[must_use]
    pub fn fallback(&self) -> Texture<TextureKey> {
        self.fallback.clone()
    }

    /// Sets the drawing buffer viewport in device pixels.
    pub fn resize(&self, width: u32, height: u32) {
        let w = i32::try_from(width).unwrap_or(i32::MAX);
        let h = i32::try_from(height).unwrap_or(i32::MAX);
        self.gl.viewport(0, 0, w, h);
    }

    /// Uploads a decoded image.
    pub fn upload_image(&mut self, image: &HtmlImageElement) -> Result<TextureKey, JsValue> {
        let texture = self.begin_texture()?;
        self.gl.tex_image_2d_with_u32_and_u32_and_html_image_element(
            Gl::TEXTURE_2D,
            0,
            rgba_internal(),
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            image,
        )?;
        Ok(self.insert(texture))
    }

    /// Uploads a 2D canvas (downscaled images and captions).
    pub fn upload_canvas(&mut self, canvas: &HtmlCanvasElement) -> Result<TextureKey, JsValue> {
        let texture = self.begin_texture()?;
        self.gl.tex_image_2d_with_u32_and_u32_and_html_canvas_element(
            Gl::TEXTURE_2D,
            0,
            rgba_internal(),
            Gl::RGBA,
            Gl::UNSIGNED_BYTE,
            canvas,
        )?;
        Ok(self.insert(texture))
    }

    /// Deletes the given textures. Unknown keys are ignored.
    pub fn release(&mut self, keys: impl IntoIterator<Item = TextureKey>) {
        for key in keys {
            if let Some(texture) = self.textures.remove(&key) {
                self.gl.delete_texture(Some(&texture));
            }
        }
    }

    /// Draws one frame.
    pub fn draw(&self, plan: &GalleryPlan) {
        let gl = &self.gl;
        gl.clear(Gl::COLOR_BUFFER_BIT);
        gl.active_texture(Gl::TEXTURE0);

        let p = &self.planes;
        gl.use_program(Some(&p.program));
        gl.uniform_matrix4fv_with_f32_array(Some(&p.view_projection), false, &plan.view_projection);
        gl.uniform1f(Some(&p.border_radius), plan.border_radius);
        gl.uniform1i(Some(&p.texture), 0);
        gl.bind_vertex_array(Some(&self.plane_mesh.vao));
        for item in &plan.items {
            let texture = item
                .texture
                .and_then(|key| self.textures.get(&key))
                .unwrap_or(&self.placeholder);
            gl.bind_texture(Gl::TEXTURE_2D, Some(texture));
            gl.uniform_matrix4fv_with_f32_array(Some(&p.model), false, &item.world_transform);
            gl.uniform2f(Some(&p.uv_scale), item.uv_scale[0], item.uv_scale[1]);
            gl.draw_elements_with_i32(
                Gl::TRIANGLES,
                self.plane_mesh.index_count,
                Gl::UNSIGNED_SHORT,
                0,
            );
        }

        let c = &self.captions;
        gl.use_program(Some(&c.program));
        gl.uniform_matrix4fv_with_f32_array(Some(&c.view_projection), false, &plan.view_projection);
        gl.uniform1i(Some(&c.texture), 0);
        gl.bind_vertex_array(Some(&self.quad_mesh.vao));
        for caption in plan.items.iter().filter_map(|item| item.caption.as_ref()) {
            let Some(texture) = self.textures.get(&caption.texture) else {
                continue;
            };
            gl.bind_texture(Gl::TEXTURE_2D, Some(texture));
            gl.uniform_matrix4fv_with_f32_array(Some(&c.model), false, &caption.world_transform);
            gl.draw_elements_with_i32(
                Gl::TRIANGLES,
                self.quad_mesh.index_count,
                Gl::UNSIGNED_SHORT,
                0,
            );
        }
        gl.bind_vertex_array(None);
    }

    /// Deletes every GL object this renderer created.
    pub fn destroy(&mut self) {
        let gl = &self.gl;
        for texture in core::mem::take(&mut self.textures).into_values() {
            gl.delete_texture(Some(&texture));
        }
        gl.delete_texture(Some(&self.placeholder));
        for mesh in [&self.plane_mesh, &self.quad_mesh] {
            gl.delete_vertex_array(Some(&mesh.vao));
            gl.delete_buffer(Some(&mesh.vertices));
            gl.delete_buffer(Some(&mesh.indices));
        }
        gl.delete_program(Some(&self.planes.program));
        gl.delete_program(Some(&self.captions.program));
    }

    fn begin_texture(&self) -> Result<WebGlTexture, JsValue> {
        let texture = self
            .gl
            .create_texture()
            .ok_or_else(|| JsValue::from_str("create GL texture"))?;
        self.gl.bind_texture(Gl::TEXTURE_2D, Some(&texture));
        set_sampling(&self.gl);
        Ok(texture)
    }

    fn insert(&mut self, texture: WebGlTexture) -> TextureKey {
        let key = TextureKey(self.next_key);
        self.next_key += 1;
        self.textures.insert(key, texture);
        key
    }
}

#[expect(
    clippy::cast_possible_wrap,
    reason = "GL enum values fit in i32"
)]
const fn rgba_internal() -> i32 {
    Gl::RGBA as i32
}

fn set_sampling(gl: &Gl) {
    #[expect(
        clippy::cast_possible_wrap,
        reason = "GL enum values fit in i32"
    )]
    let (linear, clamp) = (Gl::LINEAR as i32, Gl::CLAMP_TO_EDGE as i32);
    gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MIN_FILTER, linear);
    gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_MAG_FILTER, linear);
    gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_S, clamp);
    gl.tex_parameteri(Gl::TEXTURE_2D, Gl::TEXTURE_WRAP_T, clamp);
}

fn solid_texture(gl: &Gl, rgba: [u8; 4]) -> Result<WebGlTexture, JsValue> {
    let texture = gl
        .create_texture()
        .ok_or_else(|| JsValue::from_str("create GL texture"))?;
    gl.bind_texture(Gl::TEXTURE_2D, Some(&texture));
    set_sampling(gl);
    let pixels: Vec<u8> = rgba.iter().copied().cycle().take(2 * 2 * 4).collect();
    gl.tex_image_2d_with_i32_and_i32_and_i32_and_format_and_type_and_opt_u8_array(
        Gl::TEXTURE_2D,
        0,
        rgba_internal(),
        2,
        2,
        0,
        Gl::RGBA,
        Gl::UNSIGNED_BYTE,
        Some(&pixels),
    )?;
    Ok(texture)
}

fn upload_mesh(gl: &Gl, mesh: &PlaneMesh) -> Result<GpuMesh, JsValue> {
    let vao = gl
        .create_vertex_array()
        .ok_or_else(|| JsValue::from_str("create GL vertex array"))?;
    gl.bind_vertex_array(Some(&vao));

    let vertices = gl
        .create_buffer()
        .ok_or_else(|| JsValue::from_str("create GL buffer"))?;
    gl.bind_buffer(Gl::ARRAY_BUFFER, Some(&vertices));
    gl.buffer_data_with_u8_array(Gl::ARRAY_BUFFER, mesh.vertex_bytes(), Gl::STATIC_DRAW);

    let stride = i32::try_from(core::mem::size_of::<PlaneVertex>()).map_err(|_| "vertex stride")?;
    gl.enable_vertex_attrib_array(0);
    gl.vertex_attrib_pointer_with_i32(0, 3, Gl::FLOAT, false, stride, 0);
    gl.enable_vertex_attrib_array(1);
    gl.vertex_attrib_pointer_with_i32(1, 2, Gl::FLOAT, false, stride, 12);

    let indices = gl
        .create_buffer()
        .ok_or_else(|| JsValue::from_str("create GL buffer"))?;
    gl.bind_buffer(Gl::ELEMENT_ARRAY_BUFFER, Some(&indices));
    gl.buffer_data_with_u8_array(Gl::ELEMENT_ARRAY_BUFFER, mesh.index_bytes(), Gl::STATIC_DRAW);

    gl.bind_vertex_array(None);
    let index_count = i32::try_from(mesh.indices.len()).map_err(|_| "index count")?;
    Ok(GpuMesh {
        vao,
        vertices,
        indices,
        index_count,
    })
}

fn uniform(gl: &Gl, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation, JsValue> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| JsValue::from_str(&format!("{name} uniform not found")))
}

fn link_program(gl: &Gl, vertex: &str, fragment: &str) -> Result<WebGlProgram, JsValue> {
    let vs = compile_shader(gl, Gl::VERTEX_SHADER, vertex)?;
    let fs = compile_shader(gl, Gl::FRAGMENT_SHADER, fragment)?;
    let program = gl
        .create_program()
        .ok_or_else(|| JsValue::from_str("create GL program"))?;
    gl.attach_shader(&program, &vs);
    gl.attach_shader(&program, &fs);
    gl.link_program(&program);
    gl.delete_shader(Some(&vs));
    gl.delete_shader(Some(&fs));

    if !gl
        .get_program_parameter(&program, Gl::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        return Err(JsValue::from_str(&format!("GL program link failed: {log}")));
    }
    Ok(program)
}

fn compile_shader(gl: &Gl, shader_type: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(shader_type)
        .ok_or_else(|| JsValue::from_str("create GL shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if !gl
        .get_shader_parameter(&shader, Gl::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        return Err(JsValue::from_str(&format!(
            "GL shader compile failed: {log}"
        )));
    }
    Ok(shader)
}
