// crates/powerlink-rs-config/src/project.rs

//! The network being configured: the node collection and the passes that
//! run over all of its nodes.

use crate::error::ConfigError;
use crate::log::{LogContext, my_info};
use crate::node::{Node, NodeCollection};
use crate::od::constants::{
    IDX_NMT_MN_CN_PRES_TIMEOUT_AU32, IDX_NMT_MULTIPLEX_ASSIGN_REC, SUBIDX_NUMBER_OF_ENTRIES,
};
use crate::pdo::derive::LinearOffsets;
use crate::pdo::{add_pdo_indices_to_mn, assign_addresses, derive_node_vars};
use crate::pi::{DirectionLayout, OutputLanguage, ProcessImageVar, make_unique_names};
use crate::types::{Direction, MAX_PI_SIZE, PdoType, StationType};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// First line of every generated process-image description.
pub const PI_FILE_COMMENT: &str = "This file was autogenerated by powerlink-rs-config";

#[cfg(feature = "std")]
const DEFAULT_PI_FILE_NAME: &str = "PI";
#[cfg(feature = "std")]
const DEFAULT_CDC_FILE_NAME: &str = "mnobd";

/// Owns every node of one network configuration.
#[derive(Debug, Clone, Default)]
pub struct Project {
    pub nodes: NodeCollection,
}

impl Project {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> Result<(), ConfigError> {
        self.nodes.add(node)
    }

    /// Sets a subindex value on a node after checking the object's limits.
    pub fn set_sub_index_actual_value(
        &mut self,
        node_id: u8,
        index: u16,
        sub_index: u8,
        value: &str,
    ) -> Result<(), ConfigError> {
        self.nodes
            .node_ref_mut(node_id)?
            .set_sub_index_actual_value(index, sub_index, value)
    }

    /// Assigns a multiplexed CN to a cycle through `1F9B/<node id>`, written
    /// on whichever of MN and CN carries the subobject.
    pub fn set_forced_cycle(&mut self, node_id: u8, cycle: u8) -> Result<(), ConfigError> {
        let cn = self.nodes.node_ref(node_id)?;
        if cn.is_mn() || cn.station_type() != StationType::Multiplexed {
            return Err(ConfigError::InvalidNodeType { node_id });
        }
        let on_cn = cn
            .indices
            .contains(IDX_NMT_MULTIPLEX_ASSIGN_REC, Some(node_id));
        let on_mn = self
            .nodes
            .managing_node()?
            .indices
            .contains(IDX_NMT_MULTIPLEX_ASSIGN_REC, Some(node_id));
        if !on_mn && !on_cn {
            return Err(ConfigError::MultiplexAssignError { node_id });
        }

        let value = cycle.to_string();
        if on_mn {
            let mn = self.nodes.managing_node_mut()?;
            write_flagged(mn, IDX_NMT_MULTIPLEX_ASSIGN_REC, node_id, Some(value.clone()))?;
        }
        let cn = self.nodes.node_ref_mut(node_id)?;
        if on_cn {
            write_flagged(cn, IDX_NMT_MULTIPLEX_ASSIGN_REC, node_id, Some(value))?;
        }
        cn.set_forced_cycle_value(Some(cycle));
        Ok(())
    }

    /// Clears a CN's forced cycle on both MN and CN.
    pub fn reset_forced_cycle(&mut self, node_id: u8) -> Result<(), ConfigError> {
        for id in [crate::types::C_ADR_MN_DEF_NODE_ID, node_id] {
            if let Some(sub) = self
                .nodes
                .get_mut(id)
                .and_then(|n| n.indices.get_mut(IDX_NMT_MULTIPLEX_ASSIGN_REC))
                .and_then(|i| i.sub_index_mut(node_id))
            {
                sub.attributes.actual_value = None;
            }
        }
        self.nodes.node_ref_mut(node_id)?.set_forced_cycle_value(None);
        Ok(())
    }

    /// Records a CN's PRes timeout and writes it into the MN's `1F92/<node id>`.
    /// The MN object is left alone when it lacks that subobject.
    pub fn set_poll_response_timeout(&mut self, node_id: u8, timeout_ns: u32) -> Result<(), ConfigError> {
        self.nodes
            .node_ref_mut(node_id)?
            .set_poll_response_timeout_value(timeout_ns);

        let mn = self.nodes.managing_node_mut()?;
        let Some(index) = mn.indices.get_mut(IDX_NMT_MN_CN_PRES_TIMEOUT_AU32) else {
            return Ok(());
        };
        let Some(sub) = index.sub_index_mut(node_id) else {
            return Ok(());
        };
        sub.attributes.actual_value = Some(timeout_ns.to_string());
        index.update_number_of_entries();
        index.attributes.include_in_cdc = true;
        Ok(())
    }

    /// Derives the process image from every CN's PDO mapping.
    ///
    /// Previous variables and MN process-image objects are replaced, so
    /// running it again gives the same result. Every CN is derived and the
    /// size limit checked before anything is stored; on error the project
    /// keeps its previous process image.
    pub fn build_process_image(&mut self) -> Result<(), ConfigError> {
        self.nodes.managing_node()?.max_tpdo_channels()?;

        let mut offsets = LinearOffsets::new();
        let mut derived: Vec<(u8, Vec<ProcessImageVar>)> = Vec::new();
        for node_id in self.nodes.cn_ids() {
            let mut vars = derive_node_vars(self.nodes.node_ref(node_id)?)?;
            assign_addresses(&mut vars, &mut offsets);
            make_unique_names(&mut vars);
            derived.push((node_id, vars));
        }
        let [input_offsets, output_offsets] = checked_layout(&derived)?;

        let mut mn = self.nodes.managing_node()?.clone();
        mn.indices.delete_pi_objects();
        for var in derived.iter().flat_map(|(_, vars)| vars.iter()) {
            let Some(address) = var.pi_address else {
                continue;
            };
            let cn_pdo_type = match var.direction {
                Direction::Input => PdoType::Tpdo,
                Direction::Output => PdoType::Rpdo,
            };
            add_pdo_indices_to_mn(&mut mn, address, cn_pdo_type)?;
        }

        for (direction, offsets) in [
            (Direction::Input, input_offsets),
            (Direction::Output, output_offsets),
        ] {
            let targets = derived
                .iter_mut()
                .flat_map(|(_, vars)| vars.iter_mut())
                .filter(|v| v.direction == direction);
            for (var, (byte_offset, bit_offset)) in targets.zip(offsets) {
                var.byte_offset = byte_offset;
                var.bit_offset = bit_offset;
            }
        }

        *self.nodes.managing_node_mut()? = mn;
        for node in self.nodes.iter_mut() {
            node.process_image_vars.clear();
        }
        for (node_id, vars) in derived {
            my_info!(
                LogContext::node("pi", node_id),
                "Derived {} process-image variables.",
                vars.len()
            );
            self.nodes.node_ref_mut(node_id)?.process_image_vars = vars;
        }
        Ok(())
    }

    /// All process-image variables, in node order.
    pub fn process_image_vars(&self) -> impl Iterator<Item = &ProcessImageVar> {
        self.nodes.iter().flat_map(|n| n.process_image_vars.iter())
    }

    /// Layouts of the input and output structs.
    pub fn layouts(&self) -> (DirectionLayout<'_>, DirectionLayout<'_>) {
        let vars: Vec<&ProcessImageVar> = self.process_image_vars().collect();
        (
            DirectionLayout::compute(Direction::Input, &vars),
            DirectionLayout::compute(Direction::Output, &vars),
        )
    }

    /// Renders the process image in `lang`, `None` when nothing would be
    /// written for it.
    pub fn render_process_image(&self, lang: OutputLanguage) -> Option<String> {
        let (input, output) = self.layouts();
        lang.render(PI_FILE_COMMENT, &input, &output)
    }

    /// The CDC source text of the whole network.
    pub fn stack_configuration_text(&self) -> Result<String, ConfigError> {
        crate::cdc::write_configuration(self)
    }
}

#[cfg(feature = "std")]
impl Project {
    /// Writes `<dir>/<name>.h` or `.cs`. Any extension on `file_name` is
    /// replaced; an empty name means `PI`. Returns the written path, `None`
    /// when the language has nothing to write.
    pub fn generate_process_image_description(
        &mut self,
        lang: OutputLanguage,
        dir: &std::path::Path,
        file_name: &str,
        regenerate: bool,
    ) -> Result<Option<std::path::PathBuf>, ConfigError> {
        if regenerate {
            self.build_process_image()?;
        }
        let Some(content) = self.render_process_image(lang) else {
            crate::log::my_warn!("[PI] No process-image variables, {:?} file not written.", lang);
            return Ok(None);
        };
        let path = dir.join(format!(
            "{}.{}",
            file_stem(file_name, DEFAULT_PI_FILE_NAME),
            lang.file_extension()
        ));
        std::fs::write(&path, content).map_err(|e| ConfigError::CannotOpenFile {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        my_info!("[PI] Wrote {}.", path.display());
        Ok(Some(path))
    }

    /// Writes `<dir>/<name>.txt` and converts it into `<dir>/<name>.cdc`; an
    /// empty name means `mnobd`. Returns the path of the binary file.
    pub fn generate_stack_configuration(
        &self,
        dir: &std::path::Path,
        file_name: &str,
    ) -> Result<std::path::PathBuf, ConfigError> {
        let stem = file_stem(file_name, DEFAULT_CDC_FILE_NAME);
        let txt = dir.join(format!("{}.txt", stem));
        let cdc = dir.join(format!("{}.cdc", stem));
        let text = self.stack_configuration_text()?;
        std::fs::write(&txt, text).map_err(|e| ConfigError::CannotOpenFile {
            path: txt.display().to_string(),
            reason: e.to_string(),
        })?;
        crate::cdc::convert_file(&txt, &cdc)?;
        Ok(cdc)
    }
}

#[cfg(feature = "std")]
fn file_stem<'a>(file_name: &'a str, default: &'a str) -> &'a str {
    std::path::Path::new(file_name)
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or(default)
}

/// Sets a subindex value and flags it, its index and subindex `00` for the CDC.
fn write_flagged(
    node: &mut Node,
    index: u16,
    sub_index: u8,
    value: Option<String>,
) -> Result<(), ConfigError> {
    let idx = node.indices.index_ref_mut(index)?;
    idx.attributes.include_in_cdc = true;
    if let Some(count) = idx.sub_index_mut(SUBIDX_NUMBER_OF_ENTRIES) {
        count.attributes.include_in_cdc = true;
    }
    let sub = idx.sub_index_ref_mut(sub_index)?;
    sub.attributes.actual_value = value;
    sub.attributes.include_in_cdc = true;
    Ok(())
}

/// Byte/bit offsets of the input and output variables, in derivation
/// order, after checking each direction against `MAX_PI_SIZE`.
fn checked_layout(
    derived: &[(u8, Vec<ProcessImageVar>)],
) -> Result<[Vec<(u32, u32)>; 2], ConfigError> {
    let vars: Vec<&ProcessImageVar> = derived.iter().flat_map(|(_, vars)| vars.iter()).collect();
    let mut offsets = [Vec::new(), Vec::new()];
    for (slot, direction) in offsets.iter_mut().zip([Direction::Input, Direction::Output]) {
        let layout = DirectionLayout::compute(direction, &vars);
        let size = layout.size_bytes() as usize;
        if size > MAX_PI_SIZE {
            return Err(ConfigError::MaxPiSizeExceeded {
                actual: size,
                max: MAX_PI_SIZE,
            });
        }
        *slot = layout.var_offsets();
    }
    Ok(offsets)
}
