// Thu Feb 5 2026 - Alex

use crate::classify::{ClassifiedProperty, PropertyClassifier, RenderPosition};
use crate::context::GenerationContext;
use crate::diag::Severity;
use crate::graph::{ObjectGraph, ObjectId, ObjectKind};
use crate::names::NameScope;
use std::fmt::Write as _;

/// The two texts produced for one function: its parameter block and its
/// reconstructed body.
pub struct RenderedFunction {
    pub parameter_block: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParamDirection {
    Input,
    Output,
    Return,
}

struct Param {
    name: String,
    classified: ClassifiedProperty,
    direction: ParamDirection,
    optional: bool,
}

impl Param {
    fn flag_list(&self) -> String {
        let mut parts = vec!["Param"];
        if self.direction == ParamDirection::Output || self.direction == ParamDirection::Return {
            parts.push("OutParam");
        }
        if self.direction == ParamDirection::Return {
            parts.push("ReturnParam");
        }
        if self.optional {
            parts.push("Optional");
        }
        parts.join(", ")
    }
}

/// Reconstructs call signatures: classifies each parameter's direction and
/// optionality from its property flags and renders the parameter block plus
/// the function body.
pub struct SignatureBuilder<'a> {
    graph: &'a ObjectGraph,
}

impl<'a> SignatureBuilder<'a> {
    pub fn new(graph: &'a ObjectGraph) -> Self {
        Self { graph }
    }

    pub fn build(&self, id: ObjectId, ctx: &mut GenerationContext) -> RenderedFunction {
        let node = self.graph.node(id);
        let full_name = self.graph.full_name(id);
        let owner_name = self.owner_name(node.outer, ctx);
        let owner_scope = node.outer.map(NameScope::Type).unwrap_or(NameScope::Global);
        let function_name = ctx.names.resolve(owner_scope, &node.name);

        let params = self.collect_params(id, ctx);
        let params_type = format!("{}_{}_Params", owner_name, function_name);

        let parameter_block = self.render_parameter_block(&full_name, &params_type, &params);
        let body = self.render_body(
            node.function_flags.describe(),
            node.function_flags.is_static_dispatch(),
            &full_name,
            &owner_name,
            &function_name,
            &params_type,
            &params,
            ctx,
        );

        RenderedFunction { parameter_block, body }
    }

    fn owner_name(&self, outer: Option<ObjectId>, ctx: &mut GenerationContext) -> String {
        match outer {
            Some(outer_id) if self.graph.node(outer_id).kind.is_aggregate() => {
                ctx.type_name(self.graph, outer_id)
            }
            Some(outer_id) => crate::names::sanitize_identifier(&self.graph.node(outer_id).name),
            None => "Global".to_string(),
        }
    }

    /// Inputs render first, outputs second; the return value is pulled out
    /// of the parameter list entirely.
    fn collect_params(&self, id: ObjectId, ctx: &mut GenerationContext) -> Vec<Param> {
        let node = self.graph.node(id);
        let classifier = PropertyClassifier::new(self.graph);
        let scope = NameScope::Type(id);

        let mut params: Vec<Param> = Vec::new();
        for child_id in &node.children {
            let child = self.graph.node(*child_id);
            if child.kind != ObjectKind::Property {
                continue;
            }
            let raw = match &child.property {
                Some(raw) => raw,
                None => continue,
            };
            if !raw.flags.is_parameter() {
                continue;
            }
            let direction = if raw.flags.is_return_value() {
                ParamDirection::Return
            } else if raw.flags.is_out_parameter() {
                ParamDirection::Output
            } else {
                ParamDirection::Input
            };
            let position = match direction {
                ParamDirection::Return => RenderPosition::ReturnValue,
                _ => RenderPosition::Parameter,
            };
            params.push(Param {
                name: ctx.names.resolve(scope, &child.name),
                classified: classifier.classify(child, position, ctx),
                direction,
                optional: raw.flags.is_optional_parameter(),
            });
        }

        params.sort_by_key(|p| match p.direction {
            ParamDirection::Input => 0,
            ParamDirection::Output => 1,
            ParamDirection::Return => 2,
        });
        params
    }

    fn render_parameter_block(&self, full_name: &str, params_type: &str, params: &[Param]) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "// Function {}", full_name);
        let _ = writeln!(out, "struct {} {{", params_type);
        let mut ordered: Vec<&Param> = params.iter().collect();
        ordered.sort_by_key(|p| p.classified.offset);
        for param in ordered {
            let c = &param.classified;
            let declaration = if c.array_dim > 1 {
                format!("{} {}[0x{:X}]", c.display_type, param.name, c.array_dim)
            } else {
                format!("{} {}", c.display_type, param.name)
            };
            let _ = writeln!(
                out,
                "\t{}; // 0x{:04X}(0x{:04X}) ({})",
                declaration,
                c.offset,
                c.occupied_span(),
                param.flag_list()
            );
        }
        let _ = writeln!(out, "}};");
        let _ = writeln!(out);
        out
    }

    #[allow(clippy::too_many_arguments)]
    fn render_body(
        &self,
        flags_text: String,
        static_dispatch: bool,
        full_name: &str,
        owner_name: &str,
        function_name: &str,
        params_type: &str,
        params: &[Param],
        ctx: &mut GenerationContext,
    ) -> String {
        let return_type = params
            .iter()
            .find(|p| p.direction == ParamDirection::Return)
            .map(|p| p.classified.display_type.clone())
            .unwrap_or_else(|| "void".to_string());

        let mut signature_parts: Vec<String> = Vec::new();
        for param in params.iter().filter(|p| p.direction == ParamDirection::Input) {
            let c = &param.classified;
            if c.const_ref_eligible {
                signature_parts.push(format!("const {}& {}", c.display_type, param.name));
            } else {
                signature_parts.push(format!("{} {}", c.display_type, param.name));
            }
        }
        for param in params.iter().filter(|p| p.direction == ParamDirection::Output) {
            signature_parts.push(format!("{}& {}", param.classified.display_type, param.name));
        }

        let mut out = String::new();
        let _ = writeln!(out, "// Function {}", full_name);
        let _ = writeln!(out, "// Flags: {}", flags_text);
        if !params.is_empty() {
            let _ = writeln!(out, "// Parameters:");
            for param in params {
                let _ = writeln!(
                    out,
                    "//   {} {} ({})",
                    param.classified.display_type,
                    param.name,
                    param.flag_list()
                );
            }
        }
        let _ = writeln!(
            out,
            "{} {}::{}({})",
            return_type,
            owner_name,
            function_name,
            signature_parts.join(", ")
        );
        let _ = writeln!(out, "{{");

        match ctx.config.dispatch_callback_address {
            Some(address) => {
                let _ = writeln!(
                    out,
                    "\tstatic const void* DispatchCallback = reinterpret_cast<const void*>(0x{:X});",
                    address
                );
            }
            None => {
                if !ctx.callback_warning_issued {
                    ctx.diag.notify(
                        Severity::Warning,
                        "dispatch callback address unresolved; emitting markers in function bodies",
                    );
                    ctx.callback_warning_issued = true;
                }
                ctx.diag.unresolved_callbacks += 1;
                let _ = writeln!(out, "\t// UNRESOLVED CALLBACK: dispatch address unavailable");
            }
        }

        let _ = writeln!(out, "\t{} Params{{}};", params_type);
        for param in params.iter().filter(|p| p.direction == ParamDirection::Input) {
            let _ = writeln!(out, "\tParams.{} = {};", param.name, param.name);
        }
        if ctx.config.dispatch_callback_address.is_some() {
            let invoke = if static_dispatch {
                "InvokeStaticDispatch"
            } else {
                "InvokeDispatch"
            };
            let _ = writeln!(out, "\t{}(DispatchCallback, \"{}\", &Params);", invoke, full_name);
        }
        for param in params.iter().filter(|p| p.direction == ParamDirection::Output) {
            let _ = writeln!(out, "\t{} = Params.{};", param.name, param.name);
        }
        if let Some(ret) = params.iter().find(|p| p.direction == ParamDirection::Return) {
            let _ = writeln!(out, "\treturn Params.{};", ret.name);
        }
        let _ = writeln!(out, "}}");
        let _ = writeln!(out);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GeneratorConfig;
    use crate::diag::Diagnostics;
    use crate::graph::{
        FunctionFlags, ObjectGraph, PropertyFlags, RawProperty, RawPropertyKind, ReflectedObject,
    };

    fn context(config: GeneratorConfig) -> GenerationContext {
        GenerationContext::new(config, Diagnostics::disabled())
    }

    fn sample_function_graph() -> ObjectGraph {
        let package = ReflectedObject::new(ObjectId(0), "Engine", ObjectKind::Package);
        let class = ReflectedObject::new(ObjectId(1), "Actor", ObjectKind::TypedAggregate)
            .with_outer(ObjectId(0))
            .with_total_size(0x28);
        let func = ReflectedObject::new(ObjectId(2), "TakeDamage", ObjectKind::Function)
            .with_outer(ObjectId(1))
            .with_function_flags(FunctionFlags::NATIVE)
            .with_children(vec![ObjectId(3), ObjectId(4), ObjectId(5)]);
        let amount = ReflectedObject::new(ObjectId(3), "Amount", ObjectKind::Property)
            .with_outer(ObjectId(2))
            .with_property(
                RawProperty::new(RawPropertyKind::Float, 4, 0x0).with_flags(PropertyFlags::PARAM),
            );
        let lethal = ReflectedObject::new(ObjectId(4), "bLethal", ObjectKind::Property)
            .with_outer(ObjectId(2))
            .with_property(
                RawProperty::new(RawPropertyKind::Bool { byte_mask: 0x1 }, 1, 0x4)
                    .with_flags(PropertyFlags::PARAM | PropertyFlags::OPTIONAL_PARAM),
            );
        let result = ReflectedObject::new(ObjectId(5), "ReturnValue", ObjectKind::Property)
            .with_outer(ObjectId(2))
            .with_property(RawProperty::new(RawPropertyKind::Int32, 4, 0x8).with_flags(
                PropertyFlags::PARAM | PropertyFlags::OUT_PARAM | PropertyFlags::RETURN_PARAM,
            ));
        ObjectGraph::new(vec![package, class, func, amount, lethal, result])
    }

    #[test]
    fn test_parameter_block_annotated_with_directions() {
        let graph = sample_function_graph();
        let mut ctx = context(GeneratorConfig::default().with_dispatch_callback(0x141000000));
        let rendered = SignatureBuilder::new(&graph).build(ObjectId(2), &mut ctx);

        let block = &rendered.parameter_block;
        assert!(block.contains("// Function Engine.Actor.TakeDamage"));
        assert!(block.contains("struct Actor_TakeDamage_Params {"));
        assert!(block.contains("\tfloat Amount; // 0x0000(0x0004) (Param)"));
        assert!(block.contains("\tbool bLethal; // 0x0004(0x0001) (Param, Optional)"));
        assert!(block.contains("\tint32_t ReturnValue; // 0x0008(0x0004) (Param, OutParam, ReturnParam)"));
    }

    #[test]
    fn test_body_signature_and_dispatch() {
        let graph = sample_function_graph();
        let mut ctx = context(GeneratorConfig::default().with_dispatch_callback(0x141000000));
        let rendered = SignatureBuilder::new(&graph).build(ObjectId(2), &mut ctx);

        let body = &rendered.body;
        // Const-ref eligible input wrapped; bit-packed bool passed plain.
        assert!(body.contains("int32_t Actor::TakeDamage(const float& Amount, bool bLethal)"));
        assert!(body.contains("reinterpret_cast<const void*>(0x141000000)"));
        assert!(body.contains("InvokeDispatch(DispatchCallback, \"Engine.Actor.TakeDamage\", &Params);"));
        assert!(body.contains("\treturn Params.ReturnValue;"));
        assert!(body.contains("// Flags: Native"));
    }

    #[test]
    fn test_static_dispatch_from_function_flags() {
        let package = ReflectedObject::new(ObjectId(0), "Engine", ObjectKind::Package);
        let class = ReflectedObject::new(ObjectId(1), "GameStatics", ObjectKind::TypedAggregate)
            .with_outer(ObjectId(0));
        let func = ReflectedObject::new(ObjectId(2), "GetTime", ObjectKind::Function)
            .with_outer(ObjectId(1))
            .with_function_flags(FunctionFlags::NATIVE | FunctionFlags::STATIC);
        let graph = ObjectGraph::new(vec![package, class, func]);
        let mut ctx = context(GeneratorConfig::default().with_dispatch_callback(0x1000));
        let rendered = SignatureBuilder::new(&graph).build(ObjectId(2), &mut ctx);

        assert!(rendered.body.contains("// Flags: Native, Static"));
        assert!(rendered.body.contains("InvokeStaticDispatch("));
        assert!(rendered.body.contains("void GameStatics::GetTime()"));
    }

    #[test]
    fn test_unresolved_callback_emits_marker_and_notifies() {
        let graph = sample_function_graph();
        let mut ctx = context(GeneratorConfig::default());
        let rendered = SignatureBuilder::new(&graph).build(ObjectId(2), &mut ctx);

        assert!(rendered
            .body
            .contains("// UNRESOLVED CALLBACK: dispatch address unavailable"));
        assert!(!rendered.body.contains("InvokeDispatch("));
        assert_eq!(ctx.diag.unresolved_callbacks, 1);
        assert!(ctx.callback_warning_issued);
    }

    #[test]
    fn test_output_parameter_renders_as_mutable_reference() {
        let package = ReflectedObject::new(ObjectId(0), "Engine", ObjectKind::Package);
        let class = ReflectedObject::new(ObjectId(1), "Actor", ObjectKind::TypedAggregate)
            .with_outer(ObjectId(0));
        let func = ReflectedObject::new(ObjectId(2), "GetLocation", ObjectKind::Function)
            .with_outer(ObjectId(1))
            .with_children(vec![ObjectId(3)]);
        let out_param = ReflectedObject::new(ObjectId(3), "OutText", ObjectKind::Property)
            .with_outer(ObjectId(2))
            .with_property(
                RawProperty::new(RawPropertyKind::Str, 16, 0x0)
                    .with_flags(PropertyFlags::PARAM | PropertyFlags::OUT_PARAM),
            );
        let graph = ObjectGraph::new(vec![package, class, func, out_param]);
        let mut ctx = context(GeneratorConfig::default().with_dispatch_callback(0x1000));
        let rendered = SignatureBuilder::new(&graph).build(ObjectId(2), &mut ctx);

        assert!(rendered
            .body
            .contains("void Actor::GetLocation(struct TextBuffer& OutText)"));
        assert!(rendered.body.contains("\tOutText = Params.OutText;"));
    }
}
