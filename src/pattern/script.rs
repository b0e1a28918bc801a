//! Rhai-backed pattern runtime.
//!
//! A pattern script defines two functions:
//!
//! - `fn draw()` returns the initial generator state, or `()` when there is nothing to run.
//! - `fn step(state)` draws one frame and returns the next state, or `()` at the end of the
//!   sequence.
//!
//! Top-level statements run once when the script is compiled. Drawing goes through the host
//! API registered on the engine:
//!
//! - `pixel_count()`, `tree_height()`
//! - `x(i)`, `y(i)`, `z(i)`, `a(i)` (angle around the trunk), `d(i)` (distance from the trunk)
//! - `set_rgb(i, r, g, b)`, `set_hex(i, "#rrggbb")`, `fill(r, g, b)`, `get_packed(i)`
//!
//! `print` and `debug` output land on the runtime's bounded [`Console`].

use std::cell::{Ref, RefCell};
use std::path::Path;
use std::rc::Rc;

use anyhow::Context as _;
use rhai::{AST, CallFnOptions, Dynamic, Engine, EvalAltResult, Scope};

use crate::color::model::Color;
use crate::color::packed::PackedLightState;
use crate::foundation::core::Point3;
use crate::foundation::error::{TreevisError, TreevisResult};
use crate::pattern::console::Console;
use crate::pattern::native::Pixels;
use crate::pattern::runtime::{PatternRuntime, Resume};
use crate::topology::tree::Topology;

const DRAW_FN: &str = "draw";
const STEP_FN: &str = "step";

type Shared<T> = Rc<RefCell<T>>;
type HostResult<T> = Result<T, Box<EvalAltResult>>;

/// A compiled pattern script bound to one tree.
pub struct ScriptRuntime {
    engine: Engine,
    ast: AST,
    scope: Scope<'static>,
    pixels: Shared<Pixels>,
    console: Shared<Console>,
}

impl ScriptRuntime {
    /// Compile `source` against `topology` and run its top-level statements.
    #[tracing::instrument(skip(source, topology), fields(nodes = topology.len()))]
    pub fn compile(source: &str, topology: &Topology) -> TreevisResult<Self> {
        let pixels = Rc::new(RefCell::new(Pixels::from_topology(topology)));
        let console = Rc::new(RefCell::new(Console::new()));
        let engine = build_engine(&pixels, &console);

        let ast = engine
            .compile(source)
            .map_err(|e| TreevisError::interpreter(format!("script failed to parse: {e}")))?;
        for (name, arity) in [(DRAW_FN, 0), (STEP_FN, 1)] {
            let defined = ast
                .iter_functions()
                .any(|f| f.name == name && f.params.len() == arity);
            if !defined {
                return Err(TreevisError::validation(format!(
                    "script must define fn {name}() taking {arity} argument(s)"
                )));
            }
        }

        let mut scope = Scope::new();
        engine
            .run_ast_with_scope(&mut scope, &ast)
            .map_err(|e| TreevisError::interpreter(format!("script top level failed: {e}")))?;

        tracing::debug!(functions = ast.iter_functions().count(), "compiled pattern script");
        Ok(Self {
            engine,
            ast,
            scope,
            pixels,
            console,
        })
    }

    /// Read and compile a script file.
    pub fn load(path: &Path, topology: &Topology) -> TreevisResult<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read pattern script {}", path.display()))?;
        Self::compile(&src, topology)
    }

    /// Recent lines printed by the script or reported as faults.
    pub fn console(&self) -> Ref<'_, Console> {
        self.console.borrow()
    }

    /// Current backing colors.
    pub fn colors(&self) -> Vec<Color> {
        self.pixels.borrow().colors().to_vec()
    }

    fn call(&mut self, name: &str, args: impl rhai::FuncArgs) -> TreevisResult<Dynamic> {
        let options = CallFnOptions::new().eval_ast(false).rewind_scope(true);
        self.engine
            .call_fn_with_options::<Dynamic>(options, &mut self.scope, &self.ast, name, args)
            .map_err(|e| TreevisError::pattern(format!("{name}(): {e}")))
    }
}

impl std::fmt::Debug for ScriptRuntime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScriptRuntime")
            .field("pixels", &self.pixels.borrow().len())
            .field("console_lines", &self.console.borrow().len())
            .finish()
    }
}

impl PatternRuntime for ScriptRuntime {
    type Generator = Dynamic;

    fn create(&mut self) -> TreevisResult<Option<Dynamic>> {
        let state = self.call(DRAW_FN, ())?;
        Ok((!state.is_unit()).then_some(state))
    }

    fn resume(&mut self, generator: &mut Dynamic) -> TreevisResult<Resume> {
        let next = self.call(STEP_FN, (generator.clone(),))?;
        if next.is_unit() {
            return Ok(Resume::Finished);
        }
        *generator = next;
        Ok(Resume::Yielded)
    }

    fn report(&mut self, message: &str) {
        tracing::debug!(target: "treevis::script", "{message}");
        self.console.borrow_mut().push(message);
    }

    fn take_console(&mut self) -> Vec<String> {
        self.console.borrow_mut().drain()
    }

    fn request_frame(&mut self) -> TreevisResult<PackedLightState> {
        Ok(self.pixels.borrow().to_packed())
    }
}

fn build_engine(pixels: &Shared<Pixels>, console: &Shared<Console>) -> Engine {
    let mut engine = Engine::new();

    engine.set_max_expr_depths(64, 64);
    engine.set_max_call_levels(64);
    engine.set_max_operations(2_000_000);
    engine.set_max_string_size(10_000);
    engine.set_max_array_size(100_000);
    engine.set_max_map_size(10_000);

    let out = Rc::clone(console);
    engine.on_print(move |line| out.borrow_mut().push(line));
    let out = Rc::clone(console);
    engine.on_debug(move |line, _src, pos| out.borrow_mut().push(format!("{pos:?} {line}")));

    let px = Rc::clone(pixels);
    engine.register_fn("pixel_count", move || px.borrow().len() as i64);
    let px = Rc::clone(pixels);
    engine.register_fn("tree_height", move || px.borrow().height());

    register_coord(&mut engine, pixels, "x", |p| p.x);
    register_coord(&mut engine, pixels, "y", |p| p.y);
    register_coord(&mut engine, pixels, "z", |p| p.z);
    register_coord(&mut engine, pixels, "a", Point3::polar_angle);
    register_coord(&mut engine, pixels, "d", Point3::trunk_distance);

    let px = Rc::clone(pixels);
    engine.register_fn(
        "set_rgb",
        move |i: i64, r: i64, g: i64, b: i64| -> HostResult<()> {
            let mut px = px.borrow_mut();
            let idx = index(i, px.len())?;
            px.set(idx, Color::rgb(channel(r), channel(g), channel(b)));
            Ok(())
        },
    );

    let px = Rc::clone(pixels);
    engine.register_fn("set_hex", move |i: i64, hex: &str| -> HostResult<()> {
        let color = Color::from_hex(hex).map_err(|e| e.to_string())?;
        let mut px = px.borrow_mut();
        let idx = index(i, px.len())?;
        px.set(idx, color);
        Ok(())
    });

    let px = Rc::clone(pixels);
    engine.register_fn("fill", move |r: i64, g: i64, b: i64| {
        px.borrow_mut()
            .fill(Color::rgb(channel(r), channel(g), channel(b)));
    });

    let px = Rc::clone(pixels);
    engine.register_fn("get_packed", move |i: i64| -> HostResult<i64> {
        let px = px.borrow();
        let idx = index(i, px.len())?;
        Ok(px.get(idx).map_or(0, |c| i64::from(c.to_packed())))
    });

    engine
}

fn register_coord(
    engine: &mut Engine,
    pixels: &Shared<Pixels>,
    name: &str,
    read: fn(Point3) -> f64,
) {
    let px = Rc::clone(pixels);
    engine.register_fn(name, move |i: i64| -> HostResult<f64> {
        let px = px.borrow();
        let idx = index(i, px.len())?;
        Ok(read(px.coords()[idx]))
    });
}

fn index(i: i64, len: usize) -> HostResult<usize> {
    usize::try_from(i)
        .ok()
        .filter(|&idx| idx < len)
        .ok_or_else(|| format!("pixel index {i} out of range 0..{len}").into())
}

fn channel(v: i64) -> u8 {
    v.clamp(0, 255) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/pattern/script.rs"]
mod tests;
