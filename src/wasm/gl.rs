use web_sys::{
    WebGl2RenderingContext as GL, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

use crate::error::{NebulaError, Result, ShaderStage};
use crate::geometry::PlaneGeometry;
use crate::scene::FrameUniforms;
use crate::shader::{FRAGMENT_SHADER, VERTEX_SHADER};

const POSITION_ATTRIB: u32 = 0;
const UV_ATTRIB: u32 = 1;

/// The nebula program together with the grid it is drawn on.
pub struct NebulaMesh {
    program: WebGlProgram,
    vao: WebGlVertexArrayObject,
    index_count: i32,
    u_time: WebGlUniformLocation,
    u_projection: WebGlUniformLocation,
    u_model_view: WebGlUniformLocation,
}

impl NebulaMesh {
    pub fn new(gl: &GL, geometry: &PlaneGeometry) -> Result<Self> {
        let vs = compile_shader(gl, ShaderStage::Vertex, VERTEX_SHADER)?;
        let fs = compile_shader(gl, ShaderStage::Fragment, FRAGMENT_SHADER)?;
        let program = link_program(gl, &vs, &fs)?;
        // The program keeps its own reference once linked.
        gl.delete_shader(Some(&vs));
        gl.delete_shader(Some(&fs));

        let uniform = |name: &'static str| {
            gl.get_uniform_location(&program, name)
                .ok_or(NebulaError::MissingUniform(name))
        };
        let u_time = uniform("time")?;
        let u_projection = uniform("projectionMatrix")?;
        let u_model_view = uniform("modelViewMatrix")?;

        let vao = gl
            .create_vertex_array()
            .ok_or(NebulaError::Allocation("vertex array"))?;
        gl.bind_vertex_array(Some(&vao));
        upload_attrib(gl, POSITION_ATTRIB, 3, &geometry.positions)?;
        upload_attrib(gl, UV_ATTRIB, 2, &geometry.uvs)?;

        let ibo = gl
            .create_buffer()
            .ok_or(NebulaError::Allocation("index buffer"))?;
        gl.bind_buffer(GL::ELEMENT_ARRAY_BUFFER, Some(&ibo));
        let indices = js_sys::Uint16Array::from(geometry.indices.as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ELEMENT_ARRAY_BUFFER, &indices, GL::STATIC_DRAW);
        gl.bind_vertex_array(None);

        Ok(Self {
            program,
            vao,
            index_count: geometry.indices.len() as i32,
            u_time,
            u_projection,
            u_model_view,
        })
    }

    pub fn draw(&self, gl: &GL, uniforms: &FrameUniforms) {
        gl.clear_color(0.0, 0.0, 0.0, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        gl.use_program(Some(&self.program));
        gl.uniform1f(Some(&self.u_time), uniforms.time);
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.u_projection),
            false,
            &uniforms.projection.to_cols_array(),
        );
        gl.uniform_matrix4fv_with_f32_array(
            Some(&self.u_model_view),
            false,
            &uniforms.model_view.to_cols_array(),
        );

        gl.bind_vertex_array(Some(&self.vao));
        gl.draw_elements_with_i32(GL::TRIANGLES, self.index_count, GL::UNSIGNED_SHORT, 0);
        gl.bind_vertex_array(None);
    }
}

fn upload_attrib(gl: &GL, index: u32, size: i32, data: &[f32]) -> Result<()> {
    let buffer = gl
        .create_buffer()
        .ok_or(NebulaError::Allocation("vertex buffer"))?;
    gl.bind_buffer(GL::ARRAY_BUFFER, Some(&buffer));
    let array = js_sys::Float32Array::from(data);
    gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &array, GL::STATIC_DRAW);
    gl.enable_vertex_attrib_array(index);
    gl.vertex_attrib_pointer_with_i32(index, size, GL::FLOAT, false, 0, 0);
    Ok(())
}

fn compile_shader(gl: &GL, stage: ShaderStage, source: &str) -> Result<WebGlShader> {
    let kind = match stage {
        ShaderStage::Vertex => GL::VERTEX_SHADER,
        ShaderStage::Fragment => GL::FRAGMENT_SHADER,
    };
    let shader = gl
        .create_shader(kind)
        .ok_or(NebulaError::Allocation("shader"))?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    let ok = gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(NebulaError::ShaderCompile { stage, log })
    }
}

fn link_program(gl: &GL, vs: &WebGlShader, fs: &WebGlShader) -> Result<WebGlProgram> {
    let program = gl
        .create_program()
        .ok_or(NebulaError::Allocation("program"))?;
    gl.attach_shader(&program, vs);
    gl.attach_shader(&program, fs);
    gl.bind_attrib_location(&program, POSITION_ATTRIB, "position");
    gl.bind_attrib_location(&program, UV_ATTRIB, "uv");
    gl.link_program(&program);

    let ok = gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false);
    if ok {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(NebulaError::ProgramLink(log))
    }
}
