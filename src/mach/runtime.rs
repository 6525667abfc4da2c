use super::{evaluate, flatten, Address, Device, Instruction, Opcode, Program, Stack, Val, Var};
use crate::error;
use crate::lang::ast::{format_number, Expression, Ident, Separator, Statement};
use crate::lang::{self, Error, LineNumber};
use std::convert::TryFrom;
use std::rc::Rc;
use tracing::{debug, info};

type Result<T> = std::result::Result<T, Error>;

const TAB_WIDTH: usize = 14;
const RUN_SLICE: usize = 5000;

/// Outcome of one `execute` slice.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The cycle budget ran out; call `execute` again.
    Running,
    /// `END` or the end of the program was reached.
    Stopped,
    /// The device had no line or key ready; call `execute` again later.
    Input,
    /// The run stopped on this error. It was already printed to the device.
    Error(Error),
}

#[derive(Debug)]
struct ForFrame {
    var: Ident,
    end: f64,
    step: f64,
    /// First instruction after the `FOR`.
    address: Address,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Running,
    Stopped,
}

enum Flow {
    Next(Address),
    Input,
    End,
}

/// ## Execution engine
///
/// Steps a program counter over the flattened instructions, holding the
/// `FOR` and `GOSUB` stacks. All input and output goes through the device.

pub struct Runtime<D: Device> {
    device: D,
    program: Rc<Program>,
    vars: Var,
    for_stack: Stack<ForFrame>,
    gosub_stack: Stack<Address>,
    pc: Address,
    state: State,
    prompting: bool,
}

impl<D: Device> Runtime<D> {
    pub fn new(device: D) -> Runtime<D> {
        Runtime {
            device,
            program: Rc::new(Program::new()),
            vars: Var::new(),
            for_stack: Stack::new("FOR LOOPS NESTED TOO DEEPLY"),
            gosub_stack: Stack::new("GOSUB NESTED TOO DEEPLY"),
            pc: 0,
            state: State::Stopped,
            prompting: false,
        }
    }

    /// Flatten `source` and make it ready to run from the first line.
    pub fn load(&mut self, source: &lang::Program) {
        self.program = Rc::new(flatten(source));
        info!(
            lines = source.len(),
            instructions = self.program.len(),
            "program loaded"
        );
        self.vars.clear();
        self.for_stack.clear();
        self.gosub_stack.clear();
        self.pc = 0;
        self.prompting = false;
        self.state = State::Running;
    }

    pub fn program(&self) -> &Program {
        &self.program
    }

    pub fn vars(&self) -> &Var {
        &self.vars
    }

    pub fn device(&self) -> &D {
        &self.device
    }

    pub fn device_mut(&mut self) -> &mut D {
        &mut self.device
    }

    pub fn into_device(self) -> D {
        self.device
    }

    pub fn is_stopped(&self) -> bool {
        self.state == State::Stopped
    }

    /// Stop without an error, e.g. on a user interrupt.
    pub fn halt(&mut self) {
        self.state = State::Stopped;
        self.device.halt();
    }

    /// Run until input is exhausted, the program ends or fails.
    pub fn run(&mut self) -> Result<()> {
        loop {
            match self.execute(RUN_SLICE) {
                Event::Running => continue,
                Event::Stopped => return Ok(()),
                Event::Input => {
                    self.halt();
                    return Ok(());
                }
                Event::Error(error) => return Err(error),
            }
        }
    }

    /// Execute at most `cycles` instructions.
    pub fn execute(&mut self, cycles: usize) -> Event {
        let event = self.execute_cycles(cycles);
        if let Event::Error(error) = &event {
            self.device.print_string(&format!("{}\n", error));
        }
        self.device.render();
        event
    }

    fn execute_cycles(&mut self, cycles: usize) -> Event {
        if self.state == State::Stopped {
            return Event::Stopped;
        }
        let program = Rc::clone(&self.program);
        for _ in 0..cycles {
            let instruction = match program.get(self.pc) {
                Some(instruction) => instruction,
                None => {
                    self.halt();
                    return Event::Stopped;
                }
            };
            let next_pc = match self.step(instruction) {
                Ok(Flow::Next(addr)) => addr,
                Ok(Flow::Input) => return Event::Input,
                Ok(Flow::End) => {
                    debug!(line = instruction.line, pc = self.pc, "{}", instruction.opcode);
                    self.halt();
                    return Event::Stopped;
                }
                Err(error) => {
                    self.state = State::Stopped;
                    return Event::Error(error.or_line_number(instruction.line));
                }
            };
            debug!(
                line = instruction.line,
                pc = self.pc,
                next_pc,
                "{}",
                instruction.opcode
            );
            self.pc = next_pc;
        }
        Event::Running
    }

    fn step(&mut self, instruction: &Instruction) -> Result<Flow> {
        match &instruction.opcode {
            Opcode::Jump(addr) => Ok(Flow::Next(*addr)),
            Opcode::IfNot(cond, addr) => {
                if self.truth(cond)? {
                    Ok(Flow::Next(self.pc + 1))
                } else {
                    Ok(Flow::Next(*addr))
                }
            }
            Opcode::Statement(statement) => self.statement(instruction.line, statement),
        }
    }

    fn statement(&mut self, line: LineNumber, statement: &Statement) -> Result<Flow> {
        let next = Flow::Next(self.pc + 1);
        match statement {
            Statement::End(_) => Ok(Flow::End),
            Statement::Rem(_) => Ok(next),
            Statement::Home(_) => {
                self.device.clear();
                self.device.set_cursor_x(0);
                self.device.set_cursor_y(0);
                Ok(next)
            }
            Statement::Let(_, var, expr) => {
                let val = evaluate(expr, &self.vars)?;
                self.vars.store(var, val)?;
                Ok(next)
            }
            Statement::Print(_, exprs, separators) => {
                self.r#print(exprs, separators)?;
                Ok(next)
            }
            Statement::For(_, var, from, to, step) => {
                self.r#for(line, var, from, to, step.as_ref())?;
                Ok(next)
            }
            Statement::Next(..) => self.r#next(line),
            Statement::Goto(_, expr) => Ok(Flow::Next(self.line_address(expr)?)),
            Statement::Gosub(_, expr) => {
                let addr = self.line_address(expr)?;
                self.gosub_stack.push(self.pc + 1)?;
                Ok(Flow::Next(addr))
            }
            Statement::Return(_) => match self.gosub_stack.pop() {
                Some(addr) => Ok(Flow::Next(addr)),
                None => Err(error!(ReturnWithoutGosub, line)),
            },
            Statement::HTab(_, expr) => {
                let x = self.integer(expr)?;
                self.device.set_cursor_x(x.saturating_sub(1));
                Ok(next)
            }
            Statement::VTab(_, expr) => {
                let y = self.integer(expr)?;
                self.device.set_cursor_y(y.saturating_sub(1));
                Ok(next)
            }
            Statement::Input(_, prompt, vars) => self.r#input(prompt.as_deref(), vars),
            Statement::Get(_, var) => self.r#get(var),
            Statement::If(..) => Err(error!(InternalError, line; "UNFLATTENED IF")),
        }
    }

    fn truth(&self, cond: &Expression) -> Result<bool> {
        match evaluate(cond, &self.vars)? {
            Val::Boolean(b) => Ok(b),
            Val::Number(n) => Ok(n != 0.0),
            Val::Integer(n) => Ok(n != 0),
            Val::String(_) => Err(error!(TypeMismatch, ..cond.pos(); "NUMBER EXPECTED")),
        }
    }

    fn integer(&self, expr: &Expression) -> Result<i64> {
        i64::try_from(evaluate(expr, &self.vars)?).map_err(|e| e.at(expr.pos()))
    }

    fn line_address(&self, expr: &Expression) -> Result<Address> {
        let n = match evaluate(expr, &self.vars)? {
            Val::Number(n) => n.trunc(),
            Val::Integer(n) => n as f64,
            _ => return Err(error!(TypeMismatch, ..expr.pos(); "NUMBER EXPECTED")),
        };
        let addr = if n >= 0.0 && n <= LineNumber::max_value() as f64 {
            self.program.address_of(n as LineNumber)
        } else {
            None
        };
        addr.ok_or_else(|| error!(UndefinedLine; format_number(n)))
    }

    fn r#print(&mut self, exprs: &[Expression], separators: &[Separator]) -> Result<()> {
        let mut width = 0;
        for (i, expr) in exprs.iter().enumerate() {
            let mut s = evaluate(expr, &self.vars)?.to_string();
            if i > 0 && separators.get(i - 1) == Some(&Separator::Comma) {
                s.insert_str(0, &" ".repeat(TAB_WIDTH - width % TAB_WIDTH));
            }
            width += s.chars().count();
            self.device.print_string(&s);
        }
        if exprs.is_empty() || separators.len() < exprs.len() {
            self.device.print_string("\n");
        }
        Ok(())
    }

    fn r#for(
        &mut self,
        line: LineNumber,
        var: &Ident,
        from: &Expression,
        to: &Expression,
        step: Option<&Expression>,
    ) -> Result<()> {
        let from = evaluate(from, &self.vars)?;
        let end = f64::try_from(evaluate(to, &self.vars)?).map_err(|e| e.at(to.pos()))?;
        let step = match step {
            Some(expr) => {
                let step =
                    f64::try_from(evaluate(expr, &self.vars)?).map_err(|e| e.at(expr.pos()))?;
                // An integer variable would truncate a fractional step away.
                if let Ident::Integer(_) = var {
                    if step.fract() != 0.0 {
                        return Err(error!(TypeMismatch, ..expr.pos(); "INTEGER EXPECTED"));
                    }
                }
                step
            }
            None => 1.0,
        };
        if step == 0.0 {
            return Err(error!(StepCannotBeZero, line));
        }
        self.vars.store(var, from)?;
        self.for_stack.push(ForFrame {
            var: var.clone(),
            end,
            step,
            address: self.pc + 1,
        })
    }

    fn r#next(&mut self, line: LineNumber) -> Result<Flow> {
        let frame = match self.for_stack.last() {
            Some(frame) => frame,
            None => return Err(error!(NextWithoutFor, line)),
        };
        let value = f64::try_from(self.vars.fetch(&frame.var))? + frame.step;
        let done = (frame.step > 0.0 && value > frame.end) || (frame.step < 0.0 && value < frame.end);
        if done {
            self.for_stack.pop();
            return Ok(Flow::Next(self.pc + 1));
        }
        let address = frame.address;
        let var = frame.var.clone();
        self.vars.store(&var, Val::Number(value))?;
        Ok(Flow::Next(address))
    }

    fn r#input(&mut self, prompt: Option<&str>, vars: &[Ident]) -> Result<Flow> {
        if !self.prompting {
            self.device.print_string(prompt.unwrap_or("? "));
            self.prompting = true;
        }
        let line = match self.device.read_line() {
            Some(line) => line,
            None => return Ok(Flow::Input),
        };
        self.prompting = false;
        match parse_fields(&line, vars) {
            Some(values) => {
                for (var, val) in vars.iter().zip(values) {
                    self.vars.store(var, val)?;
                }
                Ok(Flow::Next(self.pc + 1))
            }
            None => {
                self.device.print_string("?REENTER\n");
                Ok(Flow::Next(self.pc))
            }
        }
    }

    fn r#get(&mut self, var: &Ident) -> Result<Flow> {
        let ch = match self.device.get_char() {
            Some(ch) => ch,
            None => return Ok(Flow::Input),
        };
        let val = match var {
            Ident::String(_) => Val::String(ch.to_string().into()),
            _ => match ch.to_digit(10) {
                Some(digit) => Val::Integer(digit as i64),
                None => return Err(error!(TypeMismatch; "NUMBER EXPECTED")),
            },
        };
        self.vars.store(var, val)?;
        Ok(Flow::Next(self.pc + 1))
    }
}

/// Split an `INPUT` reply on commas. `None` asks for re-entry.
fn parse_fields(line: &str, vars: &[Ident]) -> Option<Vec<Val>> {
    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() != vars.len() {
        return None;
    }
    let mut values = Vec::with_capacity(vars.len());
    for (var, field) in vars.iter().zip(fields) {
        let field = field.trim();
        match var {
            Ident::String(_) => values.push(Val::String(field.into())),
            _ => {
                let digits: String = field.chars().filter(|c| *c != ' ').collect();
                values.push(Val::Number(digits.parse::<f64>().ok()?));
            }
        }
    }
    Some(values)
}
