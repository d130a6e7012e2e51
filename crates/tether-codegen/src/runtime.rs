//! Runtime libraries written next to generated proxies.
//!
//! Generated wrappers import these instead of depending on the generator's
//! package, so they are embedded here and copied out verbatim.

/// One file of a runtime library, relative to the runtime directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuntimeFile {
    pub path: &'static str,
    pub contents: &'static str,
}

/// Each library ships a `.d.ts` next to its module so typed proxies can
/// pass type arguments to the entry point.
pub const REACT_RUNTIME: &[RuntimeFile] = &[
    RuntimeFile {
        path: "index.js",
        contents: REACT_INDEX,
    },
    RuntimeFile {
        path: "index.d.ts",
        contents: REACT_INDEX_DTS,
    },
];

pub const KDU_RUNTIME: &[RuntimeFile] = &[
    RuntimeFile {
        path: "utils.js",
        contents: KDU_UTILS,
    },
    RuntimeFile {
        path: "utils.d.ts",
        contents: KDU_UTILS_DTS,
    },
];

const REACT_INDEX_DTS: &str = r#"/* eslint-disable */
/* auto-generated react runtime types */
import React from 'react';

export interface HTMLCustomElement extends HTMLElement {
  componentOnReady(): Promise<this>;
}

export interface ReactInternalProps<ElementType> extends React.HTMLAttributes<ElementType> {
  forwardedRef: React.RefObject<ElementType>;
  ref?: React.Ref<any>;
}

export declare const attachProps: (node: HTMLElement, newProps: any, oldProps?: any) => void;

export declare const createReactComponent: <
  PropType,
  ElementType extends HTMLElement,
  ContextStateType = {},
  ExpandedPropsTypes = {}
>(
  tagName: string,
  ReactComponentContext?: React.Context<ContextStateType>,
  manipulatePropsFunction?: (
    originalProps: ReactInternalProps<ElementType>,
    propsToPass: any
  ) => ExpandedPropsTypes,
  defineCustomElement?: () => void
) => React.ForwardRefExoticComponent<
  React.PropsWithoutRef<PropType & Omit<React.HTMLAttributes<ElementType>, 'style'> & { style?: { [key: string]: any } }> &
    React.RefAttributes<ElementType>
>;
"#;

const KDU_UTILS_DTS: &str = r#"/* eslint-disable */
/* auto-generated kdu runtime types */
import type { DefineComponent } from 'kdu';

export interface InputProps<T> {
  modelValue?: T;
}

export interface RouterProps {
  routerLink?: string;
  [key: `router${string}`]: unknown;
}

export declare const defineContainer: <Props, KduModelType = string | number | boolean>(
  name: string,
  defineCustomElement: (() => void) | undefined,
  componentProps?: string[],
  modelProp?: string,
  modelUpdateEvent?: string | string[],
  externalModelUpdateEvent?: string
) => DefineComponent<Props & InputProps<KduModelType> & RouterProps>;
"#;

const REACT_INDEX: &str = r#"/* eslint-disable */
/* auto-generated react runtime */
import React, { createElement } from 'react';

const RESERVED = ['children', 'class', 'className', 'forwardedRef', 'key', 'ref', 'style'];

const dashToPascalCase = (str) =>
  str.toLowerCase().split('-').map((s) => s.charAt(0).toUpperCase() + s.slice(1)).join('');

const camelToDashCase = (str) => str.replace(/([A-Z])/g, (m) => `-${m[0].toLowerCase()}`);

const callbackEventName = (name) =>
  name.indexOf('on') === 0 && name.length > 2 && name[2] === name[2].toUpperCase()
    ? name[2].toLowerCase() + name.substring(3)
    : undefined;

const isPrimitive = (value) => ['string', 'number', 'boolean'].includes(typeof value);

const isCoveredByReact = (eventName) => {
  if (typeof document === 'undefined') {
    return true;
  }
  const lower = eventName.toLowerCase();
  return 'on' + (lower === 'doubleclick' ? 'dblclick' : lower) in document;
};

/* One listener per event name; a changed handler replaces the old one. */
const syncEvent = (node, eventName, newHandler) => {
  const store = node.__events || (node.__events = {});
  const old = store[eventName];
  if (old && old.target === newHandler) {
    return;
  }
  if (old) {
    node.removeEventListener(eventName, old);
    delete store[eventName];
  }
  if (newHandler) {
    const handler = function (e) {
      newHandler.call(this, e);
    };
    handler.target = newHandler;
    store[eventName] = handler;
    node.addEventListener(eventName, handler);
  }
};

const detachEvents = (node) => {
  const store = node.__events || {};
  Object.keys(store).forEach((name) => node.removeEventListener(name, store[name]));
  node.__events = {};
};

const getClassName = (classList, newProps, oldProps) => {
  const incoming = (newProps.className || newProps.class || '').split(' ').filter(Boolean);
  const outgoing = new Set((oldProps.className || oldProps.class || '').split(' ').filter(Boolean));
  const result = [];
  Array.from(classList).forEach((c) => {
    const i = incoming.indexOf(c);
    if (i !== -1) {
      result.push(incoming.splice(i, 1)[0]);
    } else if (!outgoing.has(c) && !result.includes(c)) {
      result.push(c);
    }
  });
  incoming.forEach((c) => !result.includes(c) && result.push(c));
  return result.join(' ');
};

const clearProp = (node, name, value) => {
  if (isPrimitive(value)) {
    node.removeAttribute(camelToDashCase(name));
  } else {
    node[name] = undefined;
  }
};

const setProp = (node, name, value) => {
  const attr = camelToDashCase(name);
  if (typeof value === 'boolean') {
    value ? node.setAttribute(attr, '') : node.removeAttribute(attr);
  } else if (isPrimitive(value)) {
    node.setAttribute(attr, String(value));
  } else {
    node[name] = value;
  }
};

export const attachProps = (node, newProps, oldProps = {}) => {
  if (!(node instanceof Element)) {
    return;
  }
  const className = getClassName(node.classList, newProps, oldProps);
  if (className !== node.className) {
    node.className = className;
  }

  Object.keys(oldProps).forEach((name) => {
    if (RESERVED.includes(name) || newProps[name] !== undefined) {
      return;
    }
    const eventName = callbackEventName(name);
    if (eventName !== undefined) {
      syncEvent(node, eventName, undefined);
    } else if (oldProps[name] !== undefined) {
      clearProp(node, name, oldProps[name]);
    }
  });

  Object.keys(newProps).forEach((name) => {
    const value = newProps[name];
    if (RESERVED.includes(name) || value === undefined) {
      return;
    }
    const eventName = callbackEventName(name);
    if (eventName !== undefined) {
      if (!isCoveredByReact(eventName)) {
        syncEvent(node, eventName, value);
      }
      return;
    }
    if (oldProps[name] === value) {
      return;
    }
    if (oldProps[name] !== undefined && isPrimitive(oldProps[name]) !== isPrimitive(value)) {
      clearProp(node, name, oldProps[name]);
    }
    setProp(node, name, value);
  });
};

const mergeRefs = (...refs) => (value) =>
  refs.forEach((ref) => {
    if (typeof ref === 'function') {
      ref(value);
    } else if (ref != null) {
      ref.current = value;
    }
  });

export const createReactComponent = (tagName, ReactComponentContext, manipulatePropsFunction, defineCustomElement) => {
  if (defineCustomElement !== undefined) {
    defineCustomElement();
  }

  const displayName = dashToPascalCase(tagName);

  class ReactComponent extends React.Component {
    setComponentElRef = (element) => {
      this.componentEl = element;
    };

    componentDidMount() {
      attachProps(this.componentEl, this.props, {});
    }

    componentDidUpdate(prevProps) {
      attachProps(this.componentEl, this.props, prevProps);
    }

    componentWillUnmount() {
      if (this.componentEl) {
        detachEvents(this.componentEl);
      }
      this.componentEl = undefined;
    }

    render() {
      const { children, forwardedRef, style, className, ref, ...cProps } = this.props;

      let propsToPass = Object.keys(cProps).reduce((acc, name) => {
        const value = cProps[name];
        const eventName = callbackEventName(name);
        if (eventName !== undefined) {
          if (typeof document !== 'undefined' && isCoveredByReact(eventName)) {
            acc[name] = value;
          }
        } else if (isPrimitive(value) && value !== false) {
          acc[camelToDashCase(name)] = value === true ? '' : value;
        }
        return acc;
      }, {});

      if (manipulatePropsFunction) {
        propsToPass = manipulatePropsFunction(this.props, propsToPass);
      }

      return createElement(
        tagName,
        { ...propsToPass, ref: mergeRefs(forwardedRef, this.setComponentElRef), style },
        children
      );
    }

    static get displayName() {
      return displayName;
    }
  }

  if (ReactComponentContext) {
    ReactComponent.contextType = ReactComponentContext;
  }

  const forwardRef = (props, ref) => createElement(ReactComponent, { ...props, forwardedRef: ref });
  forwardRef.displayName = displayName;
  return React.forwardRef(forwardRef);
};
"#;

const KDU_UTILS: &str = r#"/* eslint-disable */
/* auto-generated kdu runtime */
import { defineComponent, h, inject, onBeforeUnmount, onMounted, ref } from 'kdu';

const UPDATE_VALUE_EVENT = 'update:modelValue';
const MODEL_VALUE = 'modelValue';
const ROUTER_LINK_VALUE = 'routerLink';
const NAV_MANAGER = 'navManager';
const ROUTER_PROP_PREFIX = 'router';

/* Default of every declared prop; compared by identity only. */
const EMPTY_PROP = Symbol();
const DEFAULT_EMPTY_PROP = { default: EMPTY_PROP };

const getComponentClasses = (classes) => (classes ? String(classes).split(' ').filter(Boolean) : []);

const getElementClasses = (elRef, componentClasses) =>
  Array.from(elRef.value?.classList || []).filter(
    (c, i, self) => !componentClasses.has(c) && self.indexOf(c) === i
  );

export const defineContainer = (
  name,
  defineCustomElement,
  componentProps = [],
  modelProp,
  modelUpdateEvent,
  externalModelUpdateEvent
) => {
  if (defineCustomElement !== undefined) {
    defineCustomElement();
  }

  const Container = defineComponent((props, { attrs, slots, emit }) => {
    let modelPropValue = EMPTY_PROP;
    let lastStaticValue = EMPTY_PROP;
    const containerRef = ref();
    const classes = new Set(getComponentClasses(attrs.class));
    const listeners = [];

    onMounted(() => {
      const el = containerRef.value;
      if (!el || !modelUpdateEvent) {
        return;
      }
      const eventNames = Array.isArray(modelUpdateEvent) ? modelUpdateEvent : [modelUpdateEvent];
      eventNames.forEach((eventName) => {
        const domName = eventName.toLowerCase();
        const handler = (e) => {
          modelPropValue = e?.target[modelProp];
          emit(UPDATE_VALUE_EVENT, modelPropValue);
          /* Emitted here, after the model update, never by the element. */
          if (externalModelUpdateEvent) {
            emit(externalModelUpdateEvent, e);
          }
        };
        el.addEventListener(domName, handler);
        listeners.push([el, domName, handler]);
      });
    });

    onBeforeUnmount(() => {
      listeners.splice(0).forEach(([el, domName, handler]) => el.removeEventListener(domName, handler));
    });

    const navManager = inject(NAV_MANAGER, undefined);
    const handleRouterLink = (ev) => {
      if (props[ROUTER_LINK_VALUE] === EMPTY_PROP) {
        return;
      }
      if (navManager === undefined) {
        console.warn('Tried to navigate, but no router was found. Make sure you have mounted a router.');
        return;
      }
      const navigationPayload = { event: ev };
      for (const key in props) {
        const value = props[key];
        if (props.hasOwnProperty(key) && key.startsWith(ROUTER_PROP_PREFIX) && value !== EMPTY_PROP) {
          navigationPayload[key] = value;
        }
      }
      navManager.navigate(navigationPayload);
    };

    return () => {
      if (modelProp) {
        const staticValue = props[modelProp];
        if (staticValue !== lastStaticValue) {
          modelPropValue = staticValue;
          lastStaticValue = staticValue;
        }
      }

      getComponentClasses(attrs.class).forEach((value) => classes.add(value));

      const { class: classAttr, onClick: userClick, ...restAttrs } = attrs;
      const handleClick = (ev) => {
        if (userClick !== undefined) {
          userClick(ev);
        }
        if (!ev.defaultPrevented) {
          handleRouterLink(ev);
        }
      };

      const propsToAdd = {
        ...restAttrs,
        ref: containerRef,
        class: [...getElementClasses(containerRef, classes), ...getComponentClasses(classAttr)],
        onClick: handleClick,
      };

      for (const key in props) {
        const value = props[key];
        if (props.hasOwnProperty(key) && value !== EMPTY_PROP && key !== MODEL_VALUE) {
          propsToAdd[key] = value;
        }
      }

      if (modelProp) {
        if (props[MODEL_VALUE] !== EMPTY_PROP) {
          propsToAdd[modelProp] = props[MODEL_VALUE];
        } else if (modelPropValue !== EMPTY_PROP) {
          propsToAdd[modelProp] = modelPropValue;
        }
      }

      return h(name, propsToAdd, slots.default && slots.default());
    };
  });

  Container.displayName = name;
  Container.inheritAttrs = false;
  Container.props = {
    [ROUTER_LINK_VALUE]: DEFAULT_EMPTY_PROP,
  };
  componentProps.forEach((componentProp) => {
    Container.props[componentProp] = DEFAULT_EMPTY_PROP;
  });

  if (modelProp) {
    Container.props[MODEL_VALUE] = DEFAULT_EMPTY_PROP;
    Container.emits = [UPDATE_VALUE_EVENT, externalModelUpdateEvent].filter(Boolean);
  }

  return Container;
};
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn react_runtime_exports_entry_point() {
        assert!(REACT_RUNTIME[0].contents.contains("export const createReactComponent"));
        assert!(REACT_RUNTIME[0].contents.contains("componentWillUnmount"));
    }

    #[test]
    fn runtimes_ship_type_declarations() {
        let declared = |files: &[RuntimeFile], path: &str| files.iter().any(|f| f.path == path);

        assert!(declared(REACT_RUNTIME, "index.d.ts"));
        assert!(declared(KDU_RUNTIME, "utils.d.ts"));
        assert!(KDU_RUNTIME[1].contents.contains("export declare const defineContainer: <Props, KduModelType"));
        assert!(REACT_RUNTIME[1]
            .contents
            .contains("export declare const createReactComponent: <"));
    }

    #[test]
    fn kdu_runtime_detaches_model_listeners() {
        let utils = KDU_RUNTIME[0].contents;

        assert!(utils.contains("export const defineContainer"));
        assert!(utils.contains("onBeforeUnmount"));
        assert!(utils.contains("removeEventListener"));
    }
}
