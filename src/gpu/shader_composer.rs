//! WGSL shader composition with `#import` support via naga-oil.

use std::borrow::Cow;

use naga_oil::compose::{
    ComposableModuleDescriptor, Composer, NagaModuleDescriptor,
    ShaderLanguage, ShaderType,
};

use crate::error::LumenError;

/// Wraps `naga_oil::compose::Composer` to provide shader composition with
/// `#import` support.
///
/// Pre-loads the shared WGSL modules at construction time. Consuming
/// shaders use `#import lumen::module_name` to pull in shared code. The
/// composer produces `naga::Module` IR directly, skipping WGSL re-parse at
/// runtime.
pub struct ShaderComposer {
    composer: Composer,
}

/// Shared module definition: (source, file_path).
struct ModuleDef {
    source: &'static str,
    file_path: &'static str,
}

impl ShaderComposer {
    /// Register the shared modules.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::ShaderCompose`] if a shipped module fails to
    /// parse.
    pub fn new() -> Result<Self, LumenError> {
        let mut composer = Composer::default();

        // Register shared modules in dependency order.
        let modules: &[ModuleDef] = &[
            ModuleDef {
                source: include_str!(
                    "../../assets/shaders/modules/camera.wgsl"
                ),
                file_path: "modules/camera.wgsl",
            },
            ModuleDef {
                source: include_str!(
                    "../../assets/shaders/modules/lighting.wgsl"
                ),
                file_path: "modules/lighting.wgsl",
            },
            ModuleDef {
                source: include_str!(
                    "../../assets/shaders/modules/wave_io.wgsl"
                ),
                file_path: "modules/wave_io.wgsl",
            },
        ];

        for m in modules {
            let _ = composer
                .add_composable_module(ComposableModuleDescriptor {
                    source: m.source,
                    file_path: m.file_path,
                    language: ShaderLanguage::Wgsl,
                    ..Default::default()
                })
                .map_err(|e| {
                    LumenError::ShaderCompose(format!(
                        "module '{}': {e:?}",
                        m.file_path
                    ))
                })?;
        }

        Ok(Self { composer })
    }

    /// Compose a shader source string (which may contain `#import`
    /// directives) into a `wgpu::ShaderModule` ready for pipeline creation.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::ShaderCompose`] if composition fails.
    pub fn compose(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        source: &str,
        file_path: &str,
    ) -> Result<wgpu::ShaderModule, LumenError> {
        let naga_module = self.compose_naga(source, file_path)?;
        Ok(device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Naga(Cow::Owned(naga_module)),
        }))
    }

    /// Compose the runtime-loaded vertex/fragment source pair into one
    /// shader module.
    ///
    /// The two files are separate collaborator inputs, but WGSL wants one
    /// module, so they are merged with duplicate `#import` lines removed.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::ShaderCompose`] if the merged source does not
    /// compose.
    pub fn compose_pair(
        &mut self,
        device: &wgpu::Device,
        label: &str,
        vertex_src: &str,
        fragment_src: &str,
    ) -> Result<wgpu::ShaderModule, LumenError> {
        let merged = merge_stage_sources(vertex_src, fragment_src);
        self.compose(device, label, &merged, label)
    }

    /// Compose a shader source into a `naga::Module` without creating a
    /// wgpu shader module. Useful for testing composition without a GPU
    /// device.
    ///
    /// # Errors
    ///
    /// Returns [`LumenError::ShaderCompose`] if composition fails.
    pub fn compose_naga(
        &mut self,
        source: &str,
        file_path: &str,
    ) -> Result<naga::Module, LumenError> {
        self.composer
            .make_naga_module(NagaModuleDescriptor {
                source,
                file_path,
                shader_type: ShaderType::Wgsl,
                ..Default::default()
            })
            .map_err(|e| {
                LumenError::ShaderCompose(format!("'{file_path}': {e}"))
            })
    }
}

/// Merge two shader stage sources, keeping only the first occurrence of
/// each `#import` line.
fn merge_stage_sources(vertex_src: &str, fragment_src: &str) -> String {
    let mut seen_imports = Vec::new();
    let mut merged = String::new();
    for line in vertex_src.lines().chain(fragment_src.lines()) {
        let trimmed = line.trim_start();
        if trimmed.starts_with("#import") {
            if seen_imports.iter().any(|s: &String| s == trimmed) {
                continue;
            }
            seen_imports.push(trimmed.to_owned());
        }
        merged.push_str(line);
        merged.push('\n');
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Shader source definitions for all composable shaders shipped with
    /// the crate. Each entry is (source, file_path).
    fn all_shader_sources() -> Vec<(&'static str, &'static str)> {
        vec![
            (
                include_str!("../../assets/shaders/raster/mesh.wgsl"),
                "mesh.wgsl",
            ),
            (
                include_str!("../../assets/shaders/wave.vert.wgsl"),
                "wave.vert.wgsl",
            ),
        ]
    }

    #[test]
    fn all_shaders_compose() {
        let mut composer = ShaderComposer::new().unwrap();
        for (source, file_path) in all_shader_sources() {
            let result = composer.compose_naga(source, file_path);
            assert!(
                result.is_ok(),
                "shader '{file_path}' failed to compose: {:?}",
                result.err()
            );
        }
    }

    #[test]
    fn wave_pair_composes_as_one_module() {
        let mut composer = ShaderComposer::new().unwrap();
        let merged = merge_stage_sources(
            include_str!("../../assets/shaders/wave.vert.wgsl"),
            include_str!("../../assets/shaders/wave.frag.wgsl"),
        );
        let result = composer.compose_naga(&merged, "wave.wgsl");
        assert!(result.is_ok(), "{:?}", result.err());
    }

    #[test]
    fn duplicate_imports_are_deduplicated() {
        let a = "#import lumen::wave_io\nfn one() -> f32 { return 1.0; }\n";
        let b = "#import lumen::wave_io\nfn two() -> f32 { return 2.0; }\n";
        let merged = merge_stage_sources(a, b);
        assert_eq!(merged.matches("#import").count(), 1);
    }
}
